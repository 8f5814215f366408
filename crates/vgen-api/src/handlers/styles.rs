//! Style listing.

use axum::extract::State;
use axum::Json;

use vgen_models::StyleGroups;

use crate::state::AppState;

pub async fn list_styles(State(state): State<AppState>) -> Json<StyleGroups> {
    Json(state.styles.as_ref().clone())
}
