use axum::extract::{Multipart, State};
use axum::response::Html;

use lexclass_core::models::characteristic::ClassificationKey;

use crate::error::ApiError;
use crate::form::ClassifyForm;
use crate::routes::classify::run_classification;
use crate::state::AppState;

pub async fn show_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = state.page.render(ClassificationKey::DEFAULT.as_str(), "")?;
    Ok(Html(page))
}

/// Handle the form's submit button: classify, then re-render the page with
/// the result (or error text) in the result box.
///
/// Unreadable or oversized uploads are reported in the result box too, so a
/// browser never lands on a bare JSON error.
pub async fn submit_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, ApiError> {
    let form = match ClassifyForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(error = ?e, "form submission rejected");
            let page = state
                .page
                .render(ClassificationKey::DEFAULT.as_str(), &e.display_text())?;
            return Ok(Html(page));
        }
    };

    let outcome = run_classification(&state, form).await?;
    let selected = outcome
        .characteristic
        .clone()
        .unwrap_or_else(|| ClassificationKey::DEFAULT.to_string());
    let page = state.page.render(&selected, &outcome.output)?;
    Ok(Html(page))
}
