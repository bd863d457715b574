//! Remote document export.
//!
//! Blocking reqwest client (no Tokio runtime required). One GET per
//! document per poll, no retries: a failed fetch waits for the next cycle.

use std::time::Duration;

use crate::error::SourceError;

/// Export URL used when the configuration does not name one.
pub const DEFAULT_EXPORT_URL: &str =
    "https://docs.google.com/spreadsheets/d/{id}/export?format=xlsx";

/// Placeholder replaced by the document id in an export URL template.
pub const ID_PLACEHOLDER: &str = "{id}";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can turn a document id into spreadsheet bytes.
pub trait DocumentFetcher {
    fn fetch(&self, id: &str) -> Result<Vec<u8>, SourceError>;
}

/// Downloads documents through a spreadsheet service's export endpoint.
#[derive(Clone)]
pub struct ExportClient {
    http: reqwest::blocking::Client,
    url_template: String,
}

impl ExportClient {
    /// `url_template` must contain `{id}`.
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let url_template = url_template.into();
        if !url_template.contains(ID_PLACEHOLDER) {
            return Err(SourceError::Unavailable(format!(
                "export url '{}' has no {} placeholder",
                url_template, ID_PLACEHOLDER
            )));
        }

        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("sheetdash/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Unavailable(format!("cannot create HTTP client: {}", e)))?;

        Ok(Self { http, url_template })
    }

    pub fn export_url(&self, id: &str) -> String {
        self.url_template.replace(ID_PLACEHOLDER, id)
    }
}

impl DocumentFetcher for ExportClient {
    fn fetch(&self, id: &str) -> Result<Vec<u8>, SourceError> {
        let url = self.export_url(id);
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                SourceError::Unavailable(format!("document {}: request timed out", id))
            } else {
                SourceError::Unavailable(format!("document {}: {}", id, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Unavailable(format!(
                "document {}: HTTP {}",
                id,
                status.as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| SourceError::Unavailable(format!("document {}: {}", id, e)))?;
        log::debug!("document {}: {} bytes", id, bytes.len());
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> ExportClient {
        let template = format!("{}/d/{{id}}/export?format=xlsx", server.base_url());
        ExportClient::new(template, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn substitutes_document_id() {
        let client = ExportClient::new("https://host/d/{id}/x", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.export_url("abc123"), "https://host/d/abc123/x");
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        assert!(ExportClient::new("https://host/export", DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn returns_body_bytes() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/d/doc1/export")
                .query_param("format", "xlsx");
            then.status(200).body("payload");
        });

        let bytes = client_for(&server).fetch("doc1").unwrap();
        mock.assert();
        assert_eq!(bytes, b"payload");
    }

    #[test]
    fn non_success_status_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/d/gone/export");
            then.status(404).body("not found");
        });

        let err = client_for(&server).fetch("gone").unwrap_err();
        match err {
            SourceError::Unavailable(msg) => assert!(msg.contains("HTTP 404"), "message: {}", msg),
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn slow_response_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/d/slow/export");
            then.status(200)
                .body("late")
                .delay(Duration::from_millis(1500));
        });

        let template = format!("{}/d/{{id}}/export", server.base_url());
        let client = ExportClient::new(template, Duration::from_millis(200)).unwrap();
        let err = client.fetch("slow").unwrap_err();
        match err {
            SourceError::Unavailable(msg) => assert!(msg.contains("timed out"), "message: {}", msg),
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }
}
