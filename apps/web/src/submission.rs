//! Submission Handler: one request/response/render cycle per form submit.
//!
//! Flow: extract fields → `Loading` → POST to the prediction service (the
//! only await point) → `ResultShown` with either the prediction or an error.
//! Every completion leaves the loading indicator hidden and the submit
//! control enabled. Nothing is retried; the next submit starts fresh.

use std::collections::HashMap;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::SubmissionError;
use crate::form::FormInput;
use crate::prediction_client::{PredictionError, PredictionResponse, PredictionResult, PredictionService};
use crate::ui::UiState;

/// Receives every UI state the submission cycle passes through and renders it.
pub trait View {
    fn show(&mut self, state: &UiState);
}

/// Keeps the latest state so the page can be rendered once the cycle ends.
#[derive(Debug, Default)]
pub struct PageView {
    pub state: UiState,
}

impl View for PageView {
    fn show(&mut self, state: &UiState) {
        debug!(?state, "UI state changed");
        self.state = state.clone();
    }
}

/// Handles one form submission against `service`, reporting each UI state to `view`.
pub async fn handle_submission<V: View + Send>(
    service: &dyn PredictionService,
    fields: &HashMap<String, String>,
    view: &mut V,
) {
    let submission_id = Uuid::new_v4();
    run_cycle(service, fields, view)
        .instrument(info_span!("submission", %submission_id))
        .await
}

async fn run_cycle<V: View + Send>(
    service: &dyn PredictionService,
    fields: &HashMap<String, String>,
    view: &mut V,
) {
    let input = FormInput::from_fields(fields);
    let invalid = input.invalid_numeric_fields();
    if !invalid.is_empty() {
        debug!(?invalid, "Numeric fields sent as the invalid sentinel");
    }

    let state = UiState::Idle.to_loading();
    view.show(&state);

    let outcome = classify(service.predict(&input).await, service.endpoint());

    let state = match outcome {
        Ok(result) => {
            info!(predicted_score = result.predicted_score, "Prediction shown");
            state.to_success(&result)
        }
        Err(error) => {
            warn!("Submission failed: {error}");
            state.to_error(&error)
        }
    };
    view.show(&state);
}

/// Maps the service outcome onto the two submission failure kinds.
pub fn classify(
    outcome: Result<PredictionResponse, PredictionError>,
    endpoint: &str,
) -> Result<PredictionResult, SubmissionError> {
    match outcome {
        Ok(PredictionResponse::Success(result)) => Ok(result),
        Ok(PredictionResponse::Rejected { status, body }) => {
            debug!(status, "Prediction rejected by the service");
            Err(SubmissionError::Application {
                message: body.message().to_string(),
                details: body.details,
            })
        }
        Err(e) => Err(SubmissionError::Transport {
            description: e.to_string(),
            endpoint: endpoint.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::form::tests::sample_fields;
    use crate::form::{Coerced, FIELD_NAMES};
    use crate::prediction_client::stub::StubPrediction;
    use crate::prediction_client::tests::{closed_endpoint, spawn_server};
    use crate::prediction_client::{ErrorResult, PredictionClient};
    use crate::ui::ResultPanel;

    /// Records every state it is shown.
    #[derive(Default)]
    struct RecordingView {
        states: Vec<UiState>,
    }

    impl View for RecordingView {
        fn show(&mut self, state: &UiState) {
            self.states.push(state.clone());
        }
    }

    impl RecordingView {
        fn last(&self) -> &UiState {
            self.states.last().expect("no state shown")
        }

        fn assert_cycle_finished(&self) {
            assert_eq!(self.states.len(), 2);
            assert_eq!(self.states[0], UiState::Loading);
            let regions = self.last().regions();
            assert!(!regions.loading_visible);
            assert!(!regions.submit_disabled);
            assert!(regions.result_visible);
        }
    }

    fn success_stub() -> StubPrediction {
        StubPrediction::new(PredictionResponse::Success(PredictionResult {
            predicted_score: 82.456,
            recommendations: "Study more.\n\nSleep well.".into(),
        }))
    }

    #[tokio::test]
    async fn test_success_cycle() {
        let stub = success_stub();
        let mut view = RecordingView::default();

        handle_submission(&stub, &sample_fields(), &mut view).await;

        view.assert_cycle_finished();
        assert_eq!(
            view.last().panel(),
            Some(&ResultPanel::Success {
                score: 82.456,
                recommendations: vec!["Study more.".into(), "Sleep well.".into()],
            })
        );
    }

    #[tokio::test]
    async fn test_request_carries_coerced_input() {
        let stub = success_stub();
        let mut fields = sample_fields();
        fields.insert("study_hours".into(), "lots".into());

        handle_submission(&stub, &fields, &mut RecordingView::default()).await;

        let received = stub.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].age, Coerced::Number(20));
        assert!(received[0].study_hours.is_invalid());

        let body = serde_json::to_value(&received[0]).unwrap();
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, FIELD_NAMES.to_vec());
    }

    #[tokio::test]
    async fn test_application_error_cycle() {
        let stub = StubPrediction::new(PredictionResponse::Rejected {
            status: 400,
            body: ErrorResult::from_value(&json!({"error": "Invalid input", "details": {"field": "age"}})),
        });
        let mut view = RecordingView::default();

        handle_submission(&stub, &sample_fields(), &mut view).await;

        view.assert_cycle_finished();
        match view.last().panel().unwrap() {
            ResultPanel::ApplicationError { message, details } => {
                assert_eq!(message, "Invalid input");
                assert!(details.as_deref().unwrap().contains(r#""field": "age""#));
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_application_error_without_message_uses_fallback() {
        let stub = StubPrediction::new(PredictionResponse::Rejected {
            status: 500,
            body: ErrorResult::from_value(&json!({"success": false})),
        });
        let mut view = RecordingView::default();

        handle_submission(&stub, &sample_fields(), &mut view).await;

        view.assert_cycle_finished();
        match view.last().panel().unwrap() {
            ResultPanel::ApplicationError { message, details } => {
                assert!(!message.is_empty());
                assert!(details.is_none());
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_cycle() {
        let base = closed_endpoint().await;
        let client = PredictionClient::new(base.clone(), None).unwrap();
        let mut view = RecordingView::default();

        handle_submission(&client, &sample_fields(), &mut view).await;

        view.assert_cycle_finished();
        match view.last().panel().unwrap() {
            ResultPanel::ConnectionError {
                description,
                endpoint,
            } => {
                assert_eq!(endpoint, &base);
                assert!(!description.is_empty());
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_takes_transport_path() {
        let routes = Router::new().route(
            "/predict",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
        );
        let base = spawn_server(routes).await;
        let client = PredictionClient::new(base, None).unwrap();
        let mut view = RecordingView::default();

        handle_submission(&client, &sample_fields(), &mut view).await;

        view.assert_cycle_finished();
        assert!(matches!(
            view.last().panel(),
            Some(ResultPanel::ConnectionError { .. })
        ));
    }

    #[tokio::test]
    async fn test_end_to_end_against_live_service() {
        let routes = Router::new().route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                if body["age"].is_null() {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"success": false, "error": "Validation Error", "details": [{"loc": ["age"], "msg": "Input should be a valid integer"}]})),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({"predicted_score": 64.25, "recommendations": "Good start.\n- Keep attending."})),
                )
            }),
        );
        let base = spawn_server(routes).await;
        let client = PredictionClient::new(base, None).unwrap();

        let mut view = PageView::default();
        handle_submission(&client, &sample_fields(), &mut view).await;
        assert!(matches!(view.state.panel(), Some(ResultPanel::Success { score, .. }) if *score == 64.25));

        let mut fields = sample_fields();
        fields.insert("age".into(), "".into());
        handle_submission(&client, &fields, &mut view).await;
        match view.state.panel().unwrap() {
            ResultPanel::ApplicationError { message, details } => {
                assert_eq!(message, "Validation Error");
                assert!(details.as_deref().unwrap().contains("\"loc\""));
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }

    #[test]
    fn test_classify_transport_names_endpoint() {
        let outcome = Err(PredictionError::UnexpectedBody("response body was null".into()));
        let err = classify(outcome, "http://localhost:5000").unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Transport {
                description: "unexpected response body: response body was null".into(),
                endpoint: "http://localhost:5000".into(),
            }
        );
    }
}
