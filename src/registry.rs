use std::sync::{Mutex, MutexGuard};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A book record, as it appears on the wire and in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub quantity: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// No record matches the requested id.
    #[error("book not found")]
    NotFound,
    /// The record exists but has no copies left.
    #[error("no copies available")]
    NotAvailable,
}

/// In-memory book store.
///
/// Records live in a `Vec`, so insertion order is preserved and duplicate ids
/// are representable; lookups return the first match. Ids are never checked
/// for collisions and records are never removed.
///
/// Every operation holds the lock for its whole duration. In particular,
/// [`BookRegistry::checkout`] performs its availability check and the
/// decrement under one guard, so concurrent checkouts cannot drive a quantity
/// negative.
pub struct BookRegistry {
    books: Mutex<Vec<Book>>,
}

impl BookRegistry {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
        }
    }

    /// Registry pre-populated with the four records the service ships with.
    pub fn seeded() -> Self {
        Self::new(vec![
            Book {
                id: "1".to_string(),
                title: "The Pragmatic Programmer".to_string(),
                author: "Andrew Hunt".to_string(),
                quantity: 2,
            },
            Book {
                id: "2".to_string(),
                title: "The Mythical Man-Month".to_string(),
                author: "Frederick P. Brooks Jr.".to_string(),
                quantity: 20,
            },
            Book {
                id: "3".to_string(),
                title: "Designing Data-Intensive Applications".to_string(),
                author: "Martin Kleppmann".to_string(),
                quantity: 30,
            },
            Book {
                id: "4".to_string(),
                title: "The Art of Computer Programming".to_string(),
                author: "Donald E. Knuth".to_string(),
                quantity: 40,
            },
        ])
    }

    /// Returns every record in insertion order.
    pub fn list(&self) -> Vec<Book> {
        self.lock().clone()
    }

    /// Appends the record verbatim and echoes it back.
    pub fn insert(&self, book: Book) -> Book {
        self.lock().push(book.clone());

        book
    }

    /// Returns the first record matching `id`.
    pub fn get(&self, id: &str) -> Option<Book> {
        self.lock().iter().find(|book| book.id == id).cloned()
    }

    /// Decrements the quantity of the first record matching `id`, if a copy
    /// is available, and returns the updated record.
    pub fn checkout(&self, id: &str) -> Result<Book, CheckoutError> {
        let mut books = self.lock();

        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(CheckoutError::NotFound)?;

        if book.quantity <= 0 {
            return Err(CheckoutError::NotAvailable);
        }

        book.quantity -= 1;

        Ok(book.clone())
    }

    /// Increments the quantity of the first record matching `id` and returns
    /// the updated record. Quantities grow without an upper bound.
    pub fn check_in(&self, id: &str) -> Option<Book> {
        let mut books = self.lock();

        let book = books.iter_mut().find(|book| book.id == id)?;

        book.quantity += 1;

        Some(book.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Book>> {
        self.books.lock().expect("book registry lock poisoned")
    }
}
