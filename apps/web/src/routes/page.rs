use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::submission::{handle_submission, PageView};
use crate::ui::render::render_page;
use crate::ui::UiState;

/// GET /
/// The prediction form with the empty placeholder shown.
pub async fn handle_index() -> Html<String> {
    Html(render_page(&UiState::Idle, &HashMap::new()))
}

/// POST /
/// Runs one submission cycle and renders the page in its final state.
/// Prediction failures are part of the page, so this only errors on an unreadable form body.
pub async fn handle_submit(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(fields) = form.map_err(|e| AppError::Validation(e.body_text()))?;

    let mut view = PageView::default();
    handle_submission(state.predictor.as_ref(), &fields, &mut view).await;

    Ok(Html(render_page(&view.state, &fields)))
}
