#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use futures_util::stream;
use hubpull_fetch::{
    DownloadProgress, HttpClient, HttpResponse, HubOptions, ProgressSink, RemoteEntry, RepoId,
};
use url::Url;

pub const ENDPOINT: &str = "http://hub.test";

#[derive(Debug)]
pub struct MockError(pub String);

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl std::error::Error for MockError {}

#[derive(Clone)]
enum Route {
    Body { status: u16, body: Vec<u8> },
    Fail(String),
    Broken { prefix: Vec<u8>, message: String },
}

/// In-memory remote keyed by URL path. Unknown paths answer 404.
pub struct MockClient {
    routes:     Mutex<HashMap<String, Route>>,
    requests:   Mutex<Vec<String>>,
    chunk_size: usize,
}

impl Default for MockClient {
    fn default() -> Self { Self::new() }
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            routes:     Mutex::new(HashMap::new()),
            requests:   Mutex::new(Vec::new()),
            chunk_size: 1024,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    fn route(&self, path: String, route: Route) { self.routes.lock().unwrap().insert(path, route); }

    /// Serve `entries` as the listing of `dir` ("" for the root).
    pub fn listing(&self, repo: &str, dir: &str, entries: &[RemoteEntry]) {
        let body = serde_json::to_vec(entries).unwrap();
        self.route(listing_path(repo, dir), Route::Body { status: 200, body });
    }

    pub fn raw_listing(&self, repo: &str, dir: &str, status: u16, body: &str) {
        self.route(
            listing_path(repo, dir),
            Route::Body {
                status,
                body: body.as_bytes().to_vec(),
            },
        );
    }

    pub fn fail_listing(&self, repo: &str, dir: &str, message: &str) {
        self.route(listing_path(repo, dir), Route::Fail(message.to_string()));
    }

    pub fn file(&self, repo: &str, path: &str, body: impl Into<Vec<u8>>) {
        self.route(
            resolve_path(repo, path),
            Route::Body {
                status: 200,
                body:   body.into(),
            },
        );
    }

    pub fn file_status(&self, repo: &str, path: &str, status: u16) {
        self.route(resolve_path(repo, path), Route::Body { status, body: Vec::new() });
    }

    /// Serve `prefix` and then fail the body stream.
    pub fn broken_file(&self, repo: &str, path: &str, prefix: impl Into<Vec<u8>>, message: &str) {
        self.route(
            resolve_path(repo, path),
            Route::Broken {
                prefix:  prefix.into(),
                message: message.to_string(),
            },
        );
    }

    pub fn requests(&self) -> Vec<String> { self.requests.lock().unwrap().clone() }

    pub fn count(&self, needle: &str) -> usize {
        self.requests().iter().filter(|r| r.contains(needle)).count()
    }

    pub fn count_exact(&self, path: &str) -> usize { self.requests().iter().filter(|r| *r == path).count() }

    fn chunks(&self, body: &[u8]) -> Vec<Result<Bytes, MockError>> {
        body.chunks(self.chunk_size)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect()
    }
}

impl HttpClient for MockClient {
    type Error = MockError;

    async fn get(&self, url: &Url, _timeout: Duration) -> Result<HttpResponse<MockError>, MockError> {
        let path = url.path().to_string();
        self.requests.lock().unwrap().push(path.clone());
        let route = self.routes.lock().unwrap().get(&path).cloned();

        match route {
            None => Ok(HttpResponse {
                status: 404,
                body:   Box::pin(stream::empty()),
            }),
            Some(Route::Fail(message)) => Err(MockError(message)),
            Some(Route::Body { status, body }) => Ok(HttpResponse {
                status,
                body: Box::pin(stream::iter(self.chunks(&body))),
            }),
            Some(Route::Broken { prefix, message }) => {
                let mut items = self.chunks(&prefix);
                items.push(Err(MockError(message)));
                Ok(HttpResponse {
                    status: 200,
                    body:   Box::pin(stream::iter(items)),
                })
            }
        }
    }
}

pub fn listing_path(repo: &str, dir: &str) -> String {
    if dir.is_empty() {
        format!("/api/models/{repo}/tree/main")
    } else {
        format!("/api/models/{repo}/tree/main/{dir}")
    }
}

pub fn resolve_path(repo: &str, path: &str) -> String { format!("/{repo}/resolve/main/{path}") }

pub fn options() -> HubOptions { HubOptions::default().endpoint(ENDPOINT) }

pub fn repo(id: &str) -> RepoId { RepoId::new(id).unwrap() }

/// A sink recording every event it receives.
pub fn recording_sink() -> (ProgressSink, Arc<Mutex<Vec<DownloadProgress>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = Arc::clone(&events);
    let sink: ProgressSink = Arc::new(move |p: &DownloadProgress| events_clone.lock().unwrap().push(p.clone()));
    (sink, events)
}

/// Every regular file under `root`, relative and slash separated, sorted.
pub fn tree(root: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                let parts: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
                out.push(parts.join("/"));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
