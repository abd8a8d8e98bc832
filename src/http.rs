use std::fmt;
use std::future::Future;
use std::str::FromStr;

use crate::Error;

/// Verb used by a request. Closed set: the API only takes GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestVerb {
    Get,
    Post,
}

impl RequestVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestVerb::Get => "GET",
            RequestVerb::Post => "POST",
        }
    }
}

impl fmt::Display for RequestVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestVerb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(RequestVerb::Get),
            "POST" => Ok(RequestVerb::Post),
            _ => Err(Error::UnsupportedVerb(s.to_string())),
        }
    }
}

/// A fully populated outbound request, ready for an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: RequestVerb,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A minimal HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for sending HTTP requests. Implementations must be `Send + Sync`
/// so they can be shared across spawned tasks.
pub trait HttpClient: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>>> + Send;
}

#[cfg(feature = "reqwest-client")]
mod reqwest_impl {
    use std::sync::{Arc, OnceLock};

    use super::{HttpClient, HttpRequest, HttpResponse, RequestVerb};

    pub struct ReqwestClient {
        inner: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new() -> Self {
            Self {
                inner: reqwest::Client::new(),
            }
        }

        /// Wrap a pre-configured client (custom timeouts, proxies).
        pub fn with_client(inner: reqwest::Client) -> Self {
            Self { inner }
        }
    }

    impl Default for ReqwestClient {
        fn default() -> Self {
            Self::new()
        }
    }

    impl HttpClient for ReqwestClient {
        async fn send(
            &self,
            req: HttpRequest,
        ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>> {
            let mut builder = match req.method {
                RequestVerb::Get => self.inner.get(&req.url),
                RequestVerb::Post => self.inner.post(&req.url),
            };

            for (name, value) in &req.headers {
                builder = builder.header(name, value);
            }

            if !req.body.is_empty() {
                builder = builder.body(req.body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();

            Ok(HttpResponse { status, body })
        }
    }

    /// Process-wide shared reqwest client.
    pub fn default_client() -> Arc<ReqwestClient> {
        static CLIENT: OnceLock<Arc<ReqwestClient>> = OnceLock::new();
        CLIENT.get_or_init(|| Arc::new(ReqwestClient::new())).clone()
    }
}

#[cfg(feature = "reqwest-client")]
pub use reqwest_impl::{ReqwestClient, default_client};
