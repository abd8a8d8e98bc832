use donation_alerts::{HttpClient, HttpRequest, HttpResponse};
use std::sync::Mutex;

/// An `HttpClient` implementation that records requests and returns
/// pre-configured outcomes. Used for unit-testing controller logic
/// without a network server.
pub struct MockHttpClient {
    /// Pre-configured outcomes to return in order. `None` simulates a
    /// transport failure.
    responses: Mutex<Vec<Option<HttpResponse>>>,
    /// Recorded requests for assertion.
    recorded: Mutex<Vec<HttpRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Add a response to the queue. Responses are returned in FIFO order.
    pub fn enqueue_response(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push(Some(HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
        }));
    }

    /// Make the next request fail without a response.
    pub fn enqueue_failure(&self) {
        self.responses.lock().unwrap().push(None);
    }

    /// Drain and return all recorded requests.
    pub fn take_requests(&self) -> Vec<HttpRequest> {
        self.recorded.lock().unwrap().drain(..).collect()
    }

    pub fn request_count(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }
}

impl HttpClient for MockHttpClient {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.recorded.lock().unwrap().push(request);
        let outcome = self.responses.lock().unwrap().remove(0);
        outcome.ok_or_else(|| "connection reset by peer".into())
    }
}
