use url::Url;

const HTTPS_PROXY_VARS: [&str; 2] = ["HTTPS_PROXY", "https_proxy"];
const HTTP_PROXY_VARS: [&str; 2] = ["HTTP_PROXY", "http_proxy"];

/// Settings for the process-wide HTTP client.
///
/// Resolved once at startup; the client built from it never re-reads the
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSetting {
    pub https_proxy: Option<Url>,
    pub http_proxy:  Option<Url>,
    pub user_agent:  Option<String>,
}

impl ClientSetting {
    pub fn from_env() -> Self { Self::from_env_with(|key| std::env::var(key).ok()) }

    /// Resolve proxies from an arbitrary variable lookup.
    ///
    /// Empty values count as unset; unparsable values are ignored.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let resolve = |keys: [&str; 2]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
                .and_then(|value| match Url::parse(&value) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        tracing::warn!(proxy = %value, error = %e, "ignoring unparsable proxy");
                        None
                    }
                })
        };

        Self {
            https_proxy: resolve(HTTPS_PROXY_VARS),
            http_proxy:  resolve(HTTP_PROXY_VARS),
            user_agent:  None,
        }
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }
}
