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
    extractor::query::ApiQuery,
    registry::Book,
    state::ApiState,
};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReturnBookQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReturnBookResponse(pub Book);

impl IntoResponse for ReturnBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum ReturnBookErrorType {
    MissingId,
    NotFound {
        #[serde(skip)]
        id: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ReturnBookErrorContext {
    pub reason: String,
}

impl ResourceErrorProvider for ReturnBookErrorType {
    type Context = ReturnBookErrorContext;

    fn headers(&self) -> Option<axum::http::HeaderMap> {
        None
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ReturnBookErrorType::MissingId => StatusCode::BAD_REQUEST,
            ReturnBookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ReturnBookErrorType::MissingId => "missing query parameter 'id'",
            ReturnBookErrorType::NotFound { .. } => "book not found",
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            ReturnBookErrorType::MissingId => ReturnBookErrorContext {
                reason: "The 'id' query parameter is required".to_string(),
            },
            ReturnBookErrorType::NotFound { id } => ReturnBookErrorContext {
                reason: format!("Book with id {} not found", id),
            },
        }
    }
}

/// Checks one copy of the book matching the id query parameter back in.
pub async fn return_book(
    ApiQuery(query): ApiQuery<ReturnBookQuery>,
    State(state): State<ApiState>,
) -> Result<ReturnBookResponse, ResourceError<ReturnBookErrorType, ReturnBookErrorContext>> {
    let verbosity = state.error_verbosity();

    let id = query
        .id
        .ok_or_else(|| ResourceError::new(verbosity, ReturnBookErrorType::MissingId))?;

    match state.registry().check_in(&id) {
        Some(book) => Ok(ReturnBookResponse(book)),
        None => Err(ResourceError::new(
            verbosity,
            ReturnBookErrorType::NotFound { id },
        )),
    }
}
