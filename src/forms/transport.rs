//! Upload transport for [`FormSession::submit`](super::FormSession::submit).

use futures::stream::{self, StreamExt};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tokio::sync::mpsc;
use url::Url;

use super::controller::Submission;
use super::reply::ServerReply;
use super::ATTACHMENT_FIELD;

/// Why an upload produced no contract reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The action could not be resolved to a URL.
    Url(String),
    /// Connection or request failure.
    Network(String),
    /// Non-2xx status.
    Status(u16),
    /// Body is not a JSON object.
    Body(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Url(msg) => write!(f, "invalid upload url: {msg}"),
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Status(code) => write!(f, "unexpected status {code}"),
            TransportError::Body(msg) => write!(f, "unreadable reply: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Sends one submission and reports upload progress as `(loaded, total)`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(
        &self,
        submission: &Submission,
        progress: &mut (dyn FnMut(u64, Option<u64>) + Send),
    ) -> Result<ServerReply, TransportError>;
}

/// File bodies are streamed in chunks of this size.
const CHUNK_SIZE: usize = 64 * 1024;

/// Multipart POST over HTTP.
///
/// Text fields count as sent once the request starts. File bodies are
/// streamed and each chunk handed to the connection is reported.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestTransport {
    pub fn new(base: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    fn endpoint(&self, action: &str) -> Result<Url, TransportError> {
        self.base
            .join(action)
            .map_err(|e| TransportError::Url(e.to_string()))
    }

    fn form(
        submission: &Submission,
        sent: &mpsc::UnboundedSender<u64>,
    ) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for (name, value) in &submission.fields {
            form = form.text(name.clone(), value.clone());
        }
        for file in &submission.files {
            let chunks: Vec<Vec<u8>> = file.data.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
            let sent = sent.clone();
            let body = stream::iter(chunks).map(move |chunk| {
                // The receiver is gone once the reply is in; nothing left to report.
                let _ = sent.send(chunk.len() as u64);
                Ok::<_, std::io::Error>(chunk)
            });
            let mut part = Part::stream_with_length(
                reqwest::Body::wrap_stream(body),
                file.data.len() as u64,
            )
            .file_name(file.filename.clone());
            if let Some(content_type) = &file.content_type {
                part = part
                    .mime_str(content_type)
                    .map_err(|e| TransportError::Network(e.to_string()))?;
            }
            form = form.part(ATTACHMENT_FIELD, part);
        }
        Ok(form)
    }
}

impl Transport for ReqwestTransport {
    async fn send(
        &self,
        submission: &Submission,
        progress: &mut (dyn FnMut(u64, Option<u64>) + Send),
    ) -> Result<ServerReply, TransportError> {
        let url = self.endpoint(&submission.action)?;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let form = Self::form(submission, &tx)?;
        drop(tx);

        let total = submission.total_bytes();
        let mut loaded = submission.text_bytes();
        progress(loaded, Some(total));

        let request = self.client.post(url).multipart(form).send();
        tokio::pin!(request);
        let result = loop {
            tokio::select! {
                Some(n) = rx.recv() => {
                    loaded += n;
                    progress(loaded, Some(total));
                }
                result = &mut request => break result,
            }
        };
        while let Ok(n) = rx.try_recv() {
            loaded += n;
            progress(loaded, Some(total));
        }
        let response = result.map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        ServerReply::from_json(&body)
            .ok_or_else(|| TransportError::Body("reply is not a JSON object".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_action() {
        let transport = ReqwestTransport::new(Url::parse("http://127.0.0.1:8080/").unwrap());
        let url = transport.endpoint("/forms/vacancy").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/forms/vacancy");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(TransportError::Status(502).to_string(), "unexpected status 502");
    }
}
