use axum::{extract::State, http::header, response::IntoResponse};

use crate::AppState;

pub async fn sdl(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], state.schema.sdl())
}
