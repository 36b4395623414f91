//! HTTP client: one `POST` per question, plus the backend's `GET /` health probe.

use futures_util::future::BoxFuture;
use reqwest::Url;
use thiserror::Error;

use crate::messages::{AnswerPayload, HealthStatus, PredictRequest};

/// Failure of one call to the question-answering service.
///
/// The component treats every variant alike; the split only exists so the
/// log says what went wrong.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint URL {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Connection refused, DNS failure, TLS failure, dropped connection.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx response whose body is not the expected JSON shape.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can answer a question asynchronously.
///
/// The returned future owns everything it needs so it can be spawned onto
/// the runtime while the component keeps taking input.
pub trait AnswerBackend {
    fn predict(&self, text: String) -> BoxFuture<'static, Result<AnswerPayload, ClientError>>;
}

/// Client bound to one `/predict` endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: Url,
}

impl Client {
    /// Build a client for `endpoint` (e.g. `https://host/predict`).
    /// No timeout is set; the transport's defaults apply.
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: format!("unsupported scheme {}", endpoint.scheme()),
            });
        }
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `text` and decode the answer.
    pub async fn ask(&self, text: &str) -> Result<AnswerPayload, ClientError> {
        post_predict(&self.http, self.endpoint.clone(), text).await
    }

    /// Probe `GET /` on the endpoint's origin.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let mut url = self.endpoint.clone();
        url.set_path("/");
        url.set_query(None);
        tracing::debug!(%url, "health probe");

        let response = self.http.get(url).send().await?;
        let text = check_status(response).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl AnswerBackend for Client {
    fn predict(&self, text: String) -> BoxFuture<'static, Result<AnswerPayload, ClientError>> {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        Box::pin(async move { post_predict(&http, endpoint, &text).await })
    }
}

async fn post_predict(
    http: &reqwest::Client,
    endpoint: Url,
    text: &str,
) -> Result<AnswerPayload, ClientError> {
    tracing::debug!(%endpoint, chars = text.chars().count(), "sending question");
    let response = http
        .post(endpoint)
        .json(&PredictRequest::new(text))
        .send()
        .await?;
    let body = check_status(response).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Return the body of a 2xx response, or `ClientError::Status` otherwise.
async fn check_status(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), "response received");
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }
    Ok(response.text().await?)
}
