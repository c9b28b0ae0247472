//! Prediction Client: the single point of entry for calls to the prediction service.
//!
//! No other module talks to the service directly. Handlers hold an
//! `Arc<dyn PredictionService>` so the transport can be swapped in tests.
//!
//! There is no retry: a failed call is terminal for that submission.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::form::FormInput;

pub const PREDICT_PATH: &str = "/predict";

const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),
}

/// Body of a 2xx response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub predicted_score: f64,
    /// Newline-delimited free text.
    pub recommendations: String,
}

/// Body of a non-2xx response. Keys other than `error` and `details` are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResult {
    pub error: Option<String>,
    pub details: Option<Value>,
}

impl ErrorResult {
    /// Reads `error` and `details` with truthiness rules: empty strings, `0`,
    /// `false` and `null` count as absent.
    pub fn from_value(body: &Value) -> Self {
        let error = body.get("error").filter(|v| is_truthy(v)).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        let details = body.get("details").filter(|v| is_truthy(v)).cloned();
        Self { error, details }
    }

    /// The message to show, falling back to a generic one when the service sent none.
    pub fn message(&self) -> &str {
        self.error.as_deref().unwrap_or(DEFAULT_ERROR_MESSAGE)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// What the service answered, once a response was obtained and decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResponse {
    Success(PredictionResult),
    Rejected { status: u16, body: ErrorResult },
}

/// The prediction service seam. Implement this to swap the transport without
/// touching the submission handler.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Base URL shown to the user when the service cannot be reached.
    fn endpoint(&self) -> &str;

    async fn predict(&self, input: &FormInput) -> Result<PredictionResponse, PredictionError>;
}

/// HTTP client for `POST {base}/predict`.
#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self, PredictionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    fn predict_url(&self) -> String {
        format!("{}{}", self.base_url, PREDICT_PATH)
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn predict(&self, input: &FormInput) -> Result<PredictionResponse, PredictionError> {
        let response = self
            .client
            .post(self.predict_url())
            .header("content-type", "application/json")
            .json(input)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;

        if body.is_null() {
            return Err(PredictionError::UnexpectedBody("response body was null".into()));
        }

        if !status.is_success() {
            warn!("Prediction service returned {}: {}", status, text);
            return Ok(PredictionResponse::Rejected {
                status: status.as_u16(),
                body: ErrorResult::from_value(&body),
            });
        }

        let result: PredictionResult = serde_json::from_value(body)?;

        debug!(
            "Prediction succeeded: status={}, predicted_score={}",
            status, result.predicted_score
        );

        Ok(PredictionResponse::Success(result))
    }
}
