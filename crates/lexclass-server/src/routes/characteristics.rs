use axum::Json;
use axum::extract::State;

use crate::page::CharacteristicSummary;
use crate::state::AppState;

pub async fn list_characteristics(
    State(state): State<AppState>,
) -> Json<Vec<CharacteristicSummary>> {
    Json(CharacteristicSummary::all(state.pipeline.registry()))
}
