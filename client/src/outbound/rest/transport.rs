//! Reqwest-backed transport adapter.
//!
//! This adapter owns transport details only: URL resolution against the
//! configured base, bearer-token injection from the credential store, body
//! serialisation (JSON and multipart), and mapping of HTTP failures into
//! [`TransportError`]. It never retries and never interprets status codes
//! beyond success/failure.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::Stream;
use reqwest::{Client, Method, Url};
use tracing::debug;

use crate::domain::GENERIC_FAILURE_MESSAGE;
use crate::domain::ports::{
    ApiRequest, ApiResponse, CredentialStore, FilePart, FileSource, MultipartForm, RequestBody,
    Transport, TransportError, UploadProgress, Verb,
};

const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// Transport adapter that sends every request to one base URL.
pub struct HttpTransport {
    client: Client,
    base: Url,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpTransport {
    /// Build an adapter with an explicit request timeout.
    ///
    /// The base URL's path is normalised to end with `/` so relative paths
    /// append instead of replacing the final segment.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base: Url,
        timeout: Duration,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: normalise_base(base),
            credentials,
        })
    }

    fn resolve(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self
            .base
            .join(request.path.trim_start_matches('/'))
            .map_err(|error| TransportError::transport(format!("invalid request path: {error}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.resolve(&request)?;
        debug!(verb = %request.verb, url = %url, "sending request");

        let mut builder = self.client.request(to_method(request.verb), url);
        // Token injection is per request so rotation is picked up immediately.
        if let Some(token) = self.credentials.token() {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(form) => builder.multipart(build_form(form).await?),
        };

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(TransportError::status(
                status.as_u16(),
                error_message(body.as_ref()),
            ));
        }
        Ok(ApiResponse::new(status.as_u16(), decode_body(body.as_ref())?))
    }
}

fn to_method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Patch => Method::PATCH,
        Verb::Delete => Method::DELETE,
    }
}

fn normalise_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::transport(error.to_string())
    }
}

fn decode_body(body: &[u8]) -> Result<serde_json::Value, TransportError> {
    if body.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|error| TransportError::decode(format!("invalid JSON response: {error}")))
}

/// Derive a human-readable message from an error payload.
///
/// The API reports failures under either an `error` or a `message` key;
/// anything else falls back to the generic message.
fn error_message(body: &[u8]) -> String {
    let decoded: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return GENERIC_FAILURE_MESSAGE.to_owned(),
    };
    ["error", "message"]
        .iter()
        .find_map(|key| decoded.get(key).and_then(|v| v.as_str()))
        .map_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned(), str::to_owned)
}

async fn build_form(form: MultipartForm) -> Result<reqwest::multipart::Form, TransportError> {
    let progress = form.progress.clone();
    let mut total: u64 = 0;
    let mut loaded: Vec<(FilePart, Vec<u8>)> = Vec::with_capacity(form.files.len());
    for part in form.files {
        let bytes = match &part.source {
            FileSource::Bytes(bytes) => bytes.clone(),
            FileSource::Path(path) => tokio::fs::read(path).await.map_err(|error| {
                TransportError::transport(format!(
                    "failed to read {}: {error}",
                    path.to_string_lossy()
                ))
            })?,
        };
        total += bytes.len() as u64;
        loaded.push((part, bytes));
    }

    let sent = Arc::new(AtomicU64::new(0));
    let mut out = reqwest::multipart::Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    for (part, bytes) in loaded {
        let length = bytes.len() as u64;
        let built = if let Some(observer) = &progress {
            let stream = progress_stream(bytes, total, Arc::clone(&sent), Arc::clone(observer));
            reqwest::multipart::Part::stream_with_length(reqwest::Body::wrap_stream(stream), length)
        } else {
            reqwest::multipart::Part::bytes(bytes)
        };
        let built = built
            .file_name(part.file_name)
            .mime_str(&part.content_type)
            .map_err(|error| TransportError::transport(format!("invalid MIME type: {error}")))?;
        out = out.part(part.name, built);
    }
    Ok(out)
}

/// Chunk one file part, reporting cumulative percentage as chunks are
/// pulled onto the wire.
fn progress_stream(
    bytes: Vec<u8>,
    total: u64,
    sent: Arc<AtomicU64>,
    observer: Arc<dyn UploadProgress>,
) -> impl Stream<Item = Result<Vec<u8>, std::io::Error>> + Send + 'static {
    let chunks: Vec<Vec<u8>> = bytes.chunks(UPLOAD_CHUNK_BYTES).map(<[u8]>::to_vec).collect();
    futures_util::stream::iter(chunks.into_iter().map(move |chunk| {
        let done = sent.fetch_add(chunk.len() as u64, Ordering::SeqCst) + chunk.len() as u64;
        let percent = if total == 0 {
            100
        } else {
            u8::try_from((done * 100 / total).min(100)).unwrap_or(100)
        };
        observer.report(percent);
        Ok(chunk)
    }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the non-network mapping helpers.
    use std::sync::Arc;
    use std::sync::atomic::AtomicU64;

    use futures_util::StreamExt;
    use reqwest::Url;
    use rstest::rstest;

    use super::{decode_body, error_message, normalise_base, progress_stream};
    use crate::domain::GENERIC_FAILURE_MESSAGE;
    use crate::domain::ports::{UploadProgress, WatchUploadProgress};

    #[rstest]
    #[case(br#"{"error": "name already taken"}"#, "name already taken")]
    #[case(br#"{"message": "too large"}"#, "too large")]
    #[case(br#"{"detail": "ignored"}"#, GENERIC_FAILURE_MESSAGE)]
    #[case(b"<html>oops</html>", GENERIC_FAILURE_MESSAGE)]
    fn error_messages_prefer_server_payload(#[case] body: &[u8], #[case] expected: &str) {
        assert_eq!(error_message(body), expected);
    }

    #[rstest]
    fn empty_success_body_decodes_to_null() {
        let value = decode_body(b"").expect("empty body decodes");
        assert!(value.is_null());
    }

    #[rstest]
    fn malformed_success_body_is_a_decode_error() {
        let error = decode_body(b"not json").expect_err("decode fails");
        assert!(error.to_string().contains("invalid JSON"));
    }

    #[rstest]
    #[case("http://localhost:3000/api", "http://localhost:3000/api/")]
    #[case("http://localhost:3000/api/", "http://localhost:3000/api/")]
    fn base_url_is_normalised_with_trailing_slash(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid base");
        assert_eq!(normalise_base(base).as_str(), expected);
    }

    #[tokio::test]
    async fn progress_stream_reports_monotone_percentages_ending_at_hundred() {
        let (observer, receiver) = WatchUploadProgress::channel();
        let observer: Arc<dyn UploadProgress> = Arc::new(observer);
        let bytes = vec![0_u8; 200 * 1024];
        let total = bytes.len() as u64;

        let stream = progress_stream(bytes, total, Arc::new(AtomicU64::new(0)), observer);
        let chunks: Vec<_> = stream.collect().await;

        assert_eq!(chunks.len(), 4, "200 KiB should chunk into 4 parts");
        assert_eq!(*receiver.borrow(), 100);
    }
}
