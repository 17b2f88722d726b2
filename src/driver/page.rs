use tokio::sync::broadcast;
use uuid::Uuid;

use crate::driver::events::NetworkResponse;

/// Buffered responses per subscription. Page-level request volume is low,
/// so a lagged receiver indicates a stuck test rather than a tuning problem.
const RESPONSE_BUFFER: usize = 256;

/// Per-test-case handle to one browser page's response stream.
///
/// A browser-driver adapter forwards every response it observes into
/// [`emit_response`](Page::emit_response); the correlator subscribes before
/// running a trigger action so that nothing emitted during the action can be
/// missed. Clones share the same stream; a `Page` is owned by exactly one
/// test case and never reused across cases.
#[derive(Clone)]
pub struct Page {
    id: Uuid,
    responses: broadcast::Sender<NetworkResponse>,
}

impl Page {
    pub fn new() -> Self {
        let (responses, _) = broadcast::channel(RESPONSE_BUFFER);
        Self {
            id: Uuid::new_v4(),
            responses,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Subscribe to the response stream. Responses emitted after this call
    /// are buffered for the receiver even if it is not yet being polled.
    pub fn subscribe(&self) -> broadcast::Receiver<NetworkResponse> {
        self.responses.subscribe()
    }

    /// Publish an observed response to every active subscriber.
    ///
    /// A send with no subscribers is normal (no capture armed) and is
    /// dropped silently.
    pub fn emit_response(&self, response: NetworkResponse) {
        tracing::trace!(
            page = %self.id,
            url = %response.url,
            status = response.status.code(),
            "response observed"
        );
        let _ = self.responses.send(response);
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribe_receives_emitted_response() {
        let page = Page::new();
        let mut rx = page.subscribe();

        let resp = NetworkResponse::bare("https://app.test/api/ping", 200, "{}").unwrap();
        page.emit_response(resp);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.url, "https://app.test/api/ping");
    }

    #[tokio::test]
    async fn test_emit_without_subscriber_is_silent() {
        let page = Page::new();
        // must not panic or error
        page.emit_response(NetworkResponse::bare("https://app.test/x", 200, "").unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_stream() {
        let page = Page::new();
        let clone = page.clone();
        let mut rx = page.subscribe();

        clone.emit_response(NetworkResponse::bare("https://app.test/y", 204, "").unwrap());

        let received = rx.recv().await.unwrap();
        assert_eq!(received.status.code(), 204);
        assert_eq!(page.id(), clone.id());
    }

    #[tokio::test]
    async fn test_responses_buffered_before_recv() {
        let page = Page::new();
        let mut rx = page.subscribe();

        for i in 0..3 {
            let url = format!("https://app.test/api/{}", i);
            page.emit_response(NetworkResponse::bare(url, 200, "{}").unwrap());
        }

        for i in 0..3 {
            let received = rx.recv().await.unwrap();
            assert!(received.url.ends_with(&i.to_string()));
        }
    }
}
