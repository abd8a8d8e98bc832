use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock DonationAlerts API built on `wiremock`. Serves the REST endpoints
/// under `/api/v1` with configurable behavior.
pub struct MockDonationAlertsServer {
    server: MockServer,
}

impl MockDonationAlertsServer {
    /// Start a new mock server on a random available port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// API base URL of the mock server (e.g. "http://127.0.0.1:PORT/api/v1").
    pub fn api_url(&self) -> String {
        format!("{}/api/v1", self.server.uri())
    }

    /// Mount a handler answering `GET /api/v1/custom_alert` with the given
    /// status and JSON body.
    pub async fn mock_custom_alert(&self, status: u16, response: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/v1/custom_alert"))
            .respond_with(ResponseTemplate::new(status).set_body_json(&response))
            .mount(&self.server)
            .await;
    }

    /// Mount a handler answering `GET /api/v1/custom_alert` with a raw text body.
    pub async fn mock_custom_alert_raw(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/api/v1/custom_alert"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a handler answering `GET /api/v1/custom_alert` only after `delay`.
    pub async fn mock_custom_alert_delayed(&self, delay: std::time::Duration) {
        Mock::given(method("GET"))
            .and(path("/api/v1/custom_alert"))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Query pairs of the last request received by the server.
    pub async fn last_query(&self) -> Vec<(String, String)> {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording enabled");
        let last = requests.last().expect("expected at least one request");
        last.url.query_pairs().into_owned().collect()
    }

    /// Value of a header on the last request received by the server.
    pub async fn last_header(&self, name: &str) -> Option<String> {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording enabled");
        let last = requests.last().expect("expected at least one request");
        last.headers
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .expect("request recording enabled")
            .len()
    }
}
