use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ErrorVerbosityProvider, ResourceError, ResourceErrorProvider},
    extractor::path::ApiPath,
    registry::Book,
    state::ApiState,
};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetBookPath {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct GetBookResponse(pub Book);

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum GetBookErrorType {
    NotFound {
        #[serde(skip)]
        id: String,
    },
}

#[derive(Debug, Serialize)]
pub struct GetBookErrorContext {
    pub reason: String,
}

impl ResourceErrorProvider for GetBookErrorType {
    type Context = GetBookErrorContext;

    fn headers(&self) -> Option<axum::http::HeaderMap> {
        None
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GetBookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            GetBookErrorType::NotFound { .. } => "Book not found",
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            GetBookErrorType::NotFound { id } => GetBookErrorContext {
                reason: format!("Book with id {} not found", id),
            },
        }
    }
}

/// Returns the first book matching the path id.
pub async fn get_book(
    ApiPath(path): ApiPath<GetBookPath>,
    State(state): State<ApiState>,
) -> Result<GetBookResponse, ResourceError<GetBookErrorType, GetBookErrorContext>> {
    let id = path.id;

    match state.registry().get(&id) {
        Some(book) => Ok(GetBookResponse(book)),
        None => Err(ResourceError::new(
            state.error_verbosity(),
            GetBookErrorType::NotFound { id },
        )),
    }
}
