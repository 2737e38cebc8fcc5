use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{registry::Book, state::ApiState};

#[derive(Debug, Serialize)]
pub struct ListBooksResponse(pub Vec<Book>);

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Returns every book in the registry in insertion order.
pub async fn list_books(State(state): State<ApiState>) -> ListBooksResponse {
    ListBooksResponse(state.registry().list())
}
