use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub database_url: String,
    pub jwt_secret: String,
}

/// Echoes a few configuration values, including the derived database URL.
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let settings = &state.settings;

    Json(RootResponse {
        message: format!("hello from the {}!", settings.app_name),
        database_url: settings.database_url(),
        jwt_secret: settings.jwt_secret.clone(),
    })
}
