//! Markdown rendering through a remote HTTP endpoint.
//!
//! The endpoint receives the raw Markdown as a `text/x-markdown` POST body
//! and answers with an HTML fragment, like GitHub's `/markdown/raw` API.

use std::time::Duration;

use ureq::Agent;

use crate::error::RenderError;

/// Turns Markdown source into an HTML fragment.
pub trait MarkdownService {
    /// Render one document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the fragment cannot be obtained.
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// Create an HTTP agent that hands back non-2xx responses instead of
/// turning them into errors.
fn create_agent(timeout: Option<Duration>) -> Agent {
    Agent::config_builder()
        .timeout_global(timeout)
        .http_status_as_error(false)
        .build()
        .into()
}

/// [`MarkdownService`] backed by a blocking HTTP POST per document.
///
/// By default the response body is trusted whatever the status code, so an
/// error page from the endpoint ends up as page content. Enable
/// [`fail_on_http_error`](Self::fail_on_http_error) to abort instead.
pub struct RemoteRenderer {
    agent: Agent,
    endpoint: String,
    token: Option<String>,
    fail_on_http_error: bool,
}

impl RemoteRenderer {
    /// Create a renderer posting to `endpoint` with the client's default
    /// timeouts.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            agent: create_agent(None),
            endpoint: endpoint.into(),
            token: None,
            fail_on_http_error: false,
        }
    }

    /// Set a global timeout per request. `None` keeps the client default.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.agent = create_agent(timeout);
        self
    }

    /// Send `Authorization: Bearer <token>` with each request.
    #[must_use]
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Treat non-2xx responses as errors.
    #[must_use]
    pub fn fail_on_http_error(mut self, fail: bool) -> Self {
        self.fail_on_http_error = fail;
        self
    }

    /// Endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MarkdownService for RemoteRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        tracing::debug!(endpoint = %self.endpoint, bytes = markdown.len(), "Rendering markdown");

        let mut request = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "text/x-markdown");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send(markdown.as_bytes())
            .map_err(|e| RenderError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .into_body()
            .read_to_vec()
            .map_err(|e| RenderError::Body(e.to_string()))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        if !(200..300).contains(&status) {
            if self.fail_on_http_error {
                return Err(RenderError::Status { status, body });
            }
            tracing::warn!(
                status,
                endpoint = %self.endpoint,
                "Rendering endpoint returned an error status, writing its body as content"
            );
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let renderer = RemoteRenderer::new("https://api.github.com/markdown/raw");
        assert_eq!(renderer.endpoint(), "https://api.github.com/markdown/raw");
        assert!(renderer.token.is_none());
        assert!(!renderer.fail_on_http_error);
    }

    #[test]
    fn test_builder_options() {
        let renderer = RemoteRenderer::new("http://localhost:1")
            .timeout(Some(Duration::from_secs(5)))
            .token(Some("t0k3n".to_owned()))
            .fail_on_http_error(true);
        assert_eq!(renderer.token.as_deref(), Some("t0k3n"));
        assert!(renderer.fail_on_http_error);
    }

    #[test]
    fn test_unreachable_endpoint_is_http_error() {
        // Port 1 on loopback refuses connections.
        let renderer = RemoteRenderer::new("http://127.0.0.1:1/markdown/raw")
            .timeout(Some(Duration::from_secs(5)));
        let err = renderer.render("# Hi").unwrap_err();
        assert!(matches!(err, RenderError::Http(_)), "got {err:?}");
    }
}
