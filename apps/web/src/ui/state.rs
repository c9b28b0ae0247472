//! UI State: which result-related region of the page is visible.
//!
//! Exactly one of the empty placeholder, the loading indicator, or the result
//! panel is shown at a time. Transitions are pure: each one builds the next
//! state from the submission lifecycle event alone, and a view adapter does
//! the actual rendering.

use serde_json::Value;

use crate::errors::SubmissionError;
use crate::prediction_client::PredictionResult;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    /// Empty placeholder shown; nothing submitted yet.
    #[default]
    Idle,
    Loading,
    ResultShown(ResultPanel),
}

/// Content of the result container once a submission completes.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPanel {
    Success {
        score: f64,
        recommendations: Vec<String>,
    },
    ApplicationError {
        message: String,
        /// `details` pretty-printed with two-space indentation.
        details: Option<String>,
    },
    ConnectionError {
        description: String,
        endpoint: String,
    },
}

impl ResultPanel {
    pub fn is_error(&self) -> bool {
        !matches!(self, ResultPanel::Success { .. })
    }

    /// CSS class of the result container.
    pub fn css_class(&self) -> &'static str {
        if self.is_error() {
            "result error"
        } else {
            "result success"
        }
    }
}

/// Visibility of each page region and the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub empty_state_visible: bool,
    pub loading_visible: bool,
    pub result_visible: bool,
    pub submit_disabled: bool,
}

// Every transition fully overwrites the previous state.
impl UiState {
    pub fn to_loading(&self) -> Self {
        UiState::Loading
    }

    pub fn to_success(&self, result: &PredictionResult) -> Self {
        UiState::ResultShown(ResultPanel::Success {
            score: result.predicted_score,
            recommendations: format_recommendations(&result.recommendations),
        })
    }

    pub fn to_error(&self, error: &SubmissionError) -> Self {
        let panel = match error {
            SubmissionError::Application { message, details } => ResultPanel::ApplicationError {
                message: message.clone(),
                details: details.as_ref().map(pretty_details),
            },
            SubmissionError::Transport {
                description,
                endpoint,
            } => ResultPanel::ConnectionError {
                description: description.clone(),
                endpoint: endpoint.clone(),
            },
        };
        UiState::ResultShown(panel)
    }

    pub fn regions(&self) -> Regions {
        match self {
            UiState::Idle => Regions {
                empty_state_visible: true,
                loading_visible: false,
                result_visible: false,
                submit_disabled: false,
            },
            UiState::Loading => Regions {
                empty_state_visible: false,
                loading_visible: true,
                result_visible: false,
                submit_disabled: true,
            },
            UiState::ResultShown(_) => Regions {
                empty_state_visible: false,
                loading_visible: false,
                result_visible: true,
                submit_disabled: false,
            },
        }
    }

    pub fn panel(&self) -> Option<&ResultPanel> {
        match self {
            UiState::ResultShown(panel) => Some(panel),
            _ => None,
        }
    }
}

/// Splits on newlines, trims each line and drops the empty ones.
pub fn format_recommendations(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Score with exactly one decimal place and a percent sign.
///
/// Exact midpoints (`x.25`, `x.75`) round away from zero.
pub fn format_score(score: f64) -> String {
    let is_midpoint = (score * 4.0).fract() == 0.0 && (score * 2.0).fract() != 0.0;
    let score = if is_midpoint {
        (score * 10.0).round() / 10.0
    } else {
        score
    };
    format!("{score:.1}%")
}

fn pretty_details(details: &Value) -> String {
    serde_json::to_string_pretty(details).unwrap_or_else(|_| details.to_string())
}
