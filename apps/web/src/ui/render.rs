//! HTML rendering for the prediction page.
//!
//! The page regions keep their element ids (`predictionForm`, `emptyState`,
//! `loading`, `result`, `submitBtn`); their visibility comes from
//! [`UiState::regions`].

use std::collections::HashMap;
use std::fmt::Write;

use crate::form::choices::{ChoiceField, NumericField, CHOICE_FIELDS, NUMERIC_FIELDS};
use crate::ui::state::{format_score, ResultPanel, UiState};

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; max-width: 960px; margin: 40px auto; padding: 20px; background: #f5f7fb; }
    .layout { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; }
    .card { background: white; padding: 24px; border-radius: 10px; box-shadow: 0 2px 8px rgba(0,0,0,0.08); }
    .form-group { margin: 12px 0; }
    label { display: block; margin-bottom: 4px; font-weight: bold; }
    input, select { width: 100%; padding: 8px; border: 1px solid #ddd; border-radius: 4px; box-sizing: border-box; }
    button { width: 100%; background: #007bff; color: white; padding: 12px; border: none; border-radius: 4px; cursor: pointer; }
    button:disabled { background: #9bbce0; cursor: not-allowed; }
    .empty-state { color: #6c757d; text-align: center; padding: 40px 0; }
    .loading { align-items: center; justify-content: center; padding: 40px 0; }
    .result { padding: 20px; border-radius: 8px; }
    .result.success { background: #d4edda; border: 1px solid #c3e6cb; }
    .result.error { background: #f8d7da; color: #721c24; border: 1px solid #f5c6cb; }
    .score { font-size: 48px; font-weight: bold; text-align: center; color: #155724; }
    .score-label { text-align: center; color: #555; }
    .recommendations { margin-top: 20px; background: white; padding: 16px; border-radius: 6px; }
    .error-details pre { background: white; padding: 12px; border-radius: 4px; overflow-x: auto; }
"#;

/// Escapes text for interpolation into element content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}

/// Inner HTML of the result container.
pub fn render_panel(panel: &ResultPanel) -> String {
    match panel {
        ResultPanel::Success {
            score,
            recommendations,
        } => {
            let lines: Vec<String> = recommendations.iter().map(|l| escape_html(l)).collect();
            format!(
                r#"
            <h3 style="text-align: center; color: #155724;">Predicted Exam Score</h3>
            <div class="score">{score}</div>
            <p class="score-label">Based on the provided student information</p>
            <div class="recommendations">
                <h3>Personalized Recommendations</h3>
                <div class="recommendations-content">{recommendations}</div>
            </div>"#,
                score = format_score(*score),
                recommendations = lines.join("<br>"),
            )
        }
        ResultPanel::ApplicationError { message, details } => {
            let mut html = format!(
                r#"
            <h3>Prediction Failed</h3>
            <p>{}</p>"#,
                escape_html(message)
            );
            if let Some(details) = details {
                let _ = write!(
                    html,
                    r#"<div class="error-details"><pre>{}</pre></div>"#,
                    escape_html(details)
                );
            }
            html
        }
        ResultPanel::ConnectionError {
            description,
            endpoint,
        } => format!(
            r#"
            <h3>Connection Error</h3>
            <p>Could not connect to the prediction server.</p>
            <p style="font-size: 12px; margin-top: 10px;">Error: {}</p>
            <p style="font-size: 12px;">Make sure the prediction server is running on {}</p>"#,
            escape_html(description),
            escape_html(endpoint)
        ),
    }
}

fn display(visible: bool, shown_as: &str) -> String {
    format!("display: {};", if visible { shown_as } else { "none" })
}

fn render_numeric(html: &mut String, field: &NumericField, value: Option<&str>) {
    let _ = write!(
        html,
        r#"
            <div class="form-group">
                <label for="{name}">{label}</label>
                <input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" placeholder="{placeholder}" value="{value}" required>
            </div>"#,
        name = field.name,
        label = field.label,
        min = field.min,
        max = field.max,
        step = field.step,
        placeholder = field.placeholder,
        value = escape_attr(value.unwrap_or_default()),
    );
}

fn render_choice(html: &mut String, field: &ChoiceField, value: Option<&str>) {
    let _ = write!(
        html,
        r#"
            <div class="form-group">
                <label for="{name}">{label}</label>
                <select id="{name}" name="{name}" required>
                    <option value="">Select...</option>"#,
        name = field.name,
        label = field.label,
    );
    for option in field.options {
        let selected = if value == Some(*option) { " selected" } else { "" };
        let _ = write!(
            html,
            r#"
                    <option value="{option}"{selected}>{option}</option>"#,
        );
    }
    html.push_str(
        r#"
                </select>
            </div>"#,
    );
}

/// The whole page in `state`, with the form showing `values` (the raw
/// submitted values, or none on first load).
pub fn render_page(state: &UiState, values: &HashMap<String, String>) -> String {
    let regions = state.regions();
    let value = |name: &str| values.get(name).map(String::as_str);

    let mut fields = String::new();
    for field in NUMERIC_FIELDS {
        render_numeric(&mut fields, field, value(field.name));
    }
    for field in CHOICE_FIELDS {
        render_choice(&mut fields, field, value(field.name));
    }

    let (result_class, result_html) = match state.panel() {
        Some(panel) => (panel.css_class(), render_panel(panel)),
        None => ("result", String::new()),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Student Exam Score Predictor</title>
    <style>{STYLE}</style>
</head>
<body>
    <h1>Student Exam Score Predictor</h1>
    <div class="layout">
        <form id="predictionForm" class="card" method="post" action="/">{fields}
            <button type="submit" id="submitBtn"{disabled}>Predict Score</button>
        </form>
        <div class="card">
            <div id="emptyState" class="empty-state" style="{empty_style}">
                <p>Fill in the student details and submit to see the predicted exam score.</p>
            </div>
            <div id="loading" class="loading" style="{loading_style}">
                <p>Predicting...</p>
            </div>
            <div id="result" class="{result_class}" style="{result_style}">{result_html}
            </div>
        </div>
    </div>
</body>
</html>
"#,
        disabled = if regions.submit_disabled { " disabled" } else { "" },
        empty_style = display(regions.empty_state_visible, "block"),
        loading_style = display(regions.loading_visible, "flex"),
        result_style = display(regions.result_visible, "block"),
    )
}
