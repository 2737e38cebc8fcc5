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
    registry::{Book, CheckoutError},
    state::ApiState,
};

/// The id is optional at the extractor level so a missing parameter surfaces
/// as a domain error with its own message instead of a deserialization error.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckoutBookQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutBookResponse {
    pub message: &'static str,
    pub data: Book,
}

impl IntoResponse for CheckoutBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum CheckoutBookErrorType {
    MissingId,
    NotFound {
        #[serde(skip)]
        id: String,
    },
    NotAvailable {
        #[serde(skip)]
        id: String,
    },
}

#[derive(Debug, Serialize)]
pub struct CheckoutBookErrorContext {
    pub reason: String,
}

impl ResourceErrorProvider for CheckoutBookErrorType {
    type Context = CheckoutBookErrorContext;

    fn headers(&self) -> Option<axum::http::HeaderMap> {
        None
    }

    fn status_code(&self) -> StatusCode {
        match self {
            CheckoutBookErrorType::MissingId => StatusCode::BAD_REQUEST,
            CheckoutBookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
            CheckoutBookErrorType::NotAvailable { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            CheckoutBookErrorType::MissingId => "missing query parameter 'id'",
            CheckoutBookErrorType::NotFound { .. } => "book not found",
            CheckoutBookErrorType::NotAvailable { .. } => {
                "book is not available at the moment, check in again later"
            }
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            CheckoutBookErrorType::MissingId => CheckoutBookErrorContext {
                reason: "The 'id' query parameter is required".to_string(),
            },
            CheckoutBookErrorType::NotFound { id } => CheckoutBookErrorContext {
                reason: format!("Book with id {} not found", id),
            },
            CheckoutBookErrorType::NotAvailable { id } => CheckoutBookErrorContext {
                reason: format!("Book with id {} has no copies left", id),
            },
        }
    }
}

/// Checks out one copy of the book matching the id query parameter.
pub async fn checkout_book(
    ApiQuery(query): ApiQuery<CheckoutBookQuery>,
    State(state): State<ApiState>,
) -> Result<CheckoutBookResponse, ResourceError<CheckoutBookErrorType, CheckoutBookErrorContext>> {
    let verbosity = state.error_verbosity();

    let id = query
        .id
        .ok_or_else(|| ResourceError::new(verbosity, CheckoutBookErrorType::MissingId))?;

    match state.registry().checkout(&id) {
        Ok(book) => Ok(CheckoutBookResponse {
            message: "success",
            data: book,
        }),
        Err(CheckoutError::NotFound) => Err(ResourceError::new(
            verbosity,
            CheckoutBookErrorType::NotFound { id },
        )),
        Err(CheckoutError::NotAvailable) => Err(ResourceError::new(
            verbosity,
            CheckoutBookErrorType::NotAvailable { id },
        )),
    }
}
