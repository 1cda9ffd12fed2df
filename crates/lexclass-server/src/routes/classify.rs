use axum::Json;
use axum::extract::{Multipart, State};

use lexclass_core::models::classification::Outcome;

use crate::error::ApiError;
use crate::form::ClassifyForm;
use crate::state::AppState;

/// Run one classification and return the result box text as JSON.
///
/// Classification failures still answer 200 with `ok: false`; only malformed
/// multipart bodies and internal faults are HTTP errors.
pub async fn classify(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Outcome>, ApiError> {
    let form = ClassifyForm::from_multipart(multipart).await?;
    Ok(Json(run_classification(&state, form).await?))
}

/// Run the pipeline on the blocking pool; it makes a synchronous network call.
pub(crate) async fn run_classification(
    state: &AppState,
    form: ClassifyForm,
) -> Result<Outcome, ApiError> {
    let pipeline = state.pipeline.clone();

    let outcome = tokio::task::spawn_blocking(move || {
        pipeline.handle(form.document.as_ref(), form.characteristic.as_deref())
    })
    .await?;

    Ok(outcome)
}
