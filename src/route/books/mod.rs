pub mod app;
pub use app::app;
pub mod checkout_book;
pub mod create_book;
pub mod get_book;
pub mod list_books;
pub mod return_book;
