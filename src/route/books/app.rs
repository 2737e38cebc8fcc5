use axum::{
    routing::{get, patch},
    Router,
};

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .route(
            "/books",
            get(super::list_books::list_books).post(super::create_book::create_book),
        )
        .route("/books/:id", get(super::get_book::get_book))
        .route("/checkout", patch(super::checkout_book::checkout_book))
        .route("/return", patch(super::return_book::return_book))
}
