use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{extractor::json::ApiJson, registry::Book, state::ApiState};

#[derive(Debug, Serialize)]
pub struct CreateBookResponse(pub Book);

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Appends the posted record verbatim.
///
/// Ids are neither generated nor checked for collisions; posting an id that
/// already exists leaves two records behind and lookups keep resolving to the
/// older one.
pub async fn create_book(
    State(state): State<ApiState>,
    ApiJson(book): ApiJson<Book>,
) -> CreateBookResponse {
    CreateBookResponse(state.registry().insert(book))
}
