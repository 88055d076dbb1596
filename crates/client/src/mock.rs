// Recording mock HTTP client for testing
use crate::transport::{HttpClient, HttpRequest, HttpResponse};
use async_trait::async_trait;
use colladmin_core::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// [`HttpClient`] that replays queued responses and records every request
///
/// Responses are consumed in order. A request with nothing queued fails
/// with a transport error.
#[derive(Default)]
pub struct MockHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queue a transport failure
    pub fn fail(self, message: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Err(Error::transport(message)));
        self
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Number of queued responses not yet consumed
    pub fn pending(&self) -> usize {
        lock(&self.responses).len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let description = format!("{} {}", request.method, request.url);
        lock(&self.requests).push(request);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(Error::transport(format!("no response queued for {description}"))))
    }
}
