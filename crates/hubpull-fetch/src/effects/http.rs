use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use url::Url;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Status line and streaming body of a response.
pub struct HttpResponse<E> {
    pub status: u16,
    pub body:   BoxStream<'static, Result<Bytes, E>>,
}

impl<E> HttpResponse<E> {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }

    /// Drain the body into memory. Only meant for small bodies like listings.
    pub async fn collect(self) -> Result<Vec<u8>, E> {
        self.body
            .try_fold(Vec::new(), |mut buf, chunk| async move {
                buf.extend_from_slice(&chunk);
                Ok(buf)
            })
            .await
    }
}

/// Asynchronous HTTP client abstraction.
///
/// One instance is built at startup and shared by every component. The
/// implementation owns redirects, proxies and connection reuse; a non-2xx
/// status is not an error at this level.
///
/// # Implementations
///
/// - [`ReqwestClient`]: production implementation using `reqwest`
/// - In-memory mocks in tests
pub trait HttpClient: Send + Sync {
    /// Transport failure, including an expired timeout.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET for `url`. `timeout` bounds the whole exchange, body
    /// included.
    fn get(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> impl Future<Output = Result<HttpResponse<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::ClientSetting;
    use reqwest::{Client, Proxy};
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum ClientSettingError {
        #[error("invalid proxy URL {url}: {source}")]
        Proxy {
            url:    String,
            #[source]
            source: reqwest::Error,
        },

        #[error("failed to build client: {0}")]
        Build(#[from] reqwest::Error),
    }

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: Client,
    }

    impl ReqwestClient {
        /// Build a client from resolved settings.
        ///
        /// Environment proxy detection inside reqwest is disabled; only the
        /// proxies in `setting` are used.
        pub fn new(setting: &ClientSetting) -> Result<Self, ClientSettingError> {
            let mut cb = Client::builder().no_proxy();

            if let Some(url) = &setting.https_proxy {
                cb = cb.proxy(Proxy::https(url.as_str()).map_err(|source| {
                    ClientSettingError::Proxy {
                        url: url.to_string(),
                        source,
                    }
                })?);
            }
            if let Some(url) = &setting.http_proxy {
                cb = cb.proxy(Proxy::http(url.as_str()).map_err(|source| {
                    ClientSettingError::Proxy {
                        url: url.to_string(),
                        source,
                    }
                })?);
            }
            let agent = setting
                .user_agent
                .clone()
                .unwrap_or_else(|| concat!("hubpull/", env!("CARGO_PKG_VERSION")).to_string());

            Ok(Self {
                client: cb.user_agent(agent).build()?,
            })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &Url,
            timeout: Duration,
        ) -> Result<HttpResponse<Self::Error>, Self::Error> {
            let response = self.client.get(url.clone()).timeout(timeout).send().await?;
            let status = response.status().as_u16();
            Ok(HttpResponse {
                status,
                body: Box::pin(response.bytes_stream()),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientSettingError, ReqwestClient};
