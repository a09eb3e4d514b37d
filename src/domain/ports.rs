use crate::domain::model::{Book, Loan, SearchCriteria, User};
use crate::utils::error::Result;

/// Storage for book records. No business rules live here.
pub trait Catalog {
    /// Appends the book and returns the stored record. Identifiers are not checked for duplicates.
    fn add(&mut self, book: Book) -> &Book;
    /// All books in insertion order.
    fn list(&self) -> &[Book];
    fn find_by_identifier(&self, identifier: &str) -> Option<&Book>;
    fn find_by_identifier_mut(&mut self, identifier: &str) -> Option<&mut Book>;

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

/// Circulation rules over a catalog.
pub trait LoanService {
    fn checkout(&mut self, user: &User, book_identifier: &str) -> Result<Loan>;
    fn return_book(&mut self, user: &User, book_identifier: &str) -> Result<()>;
    fn search(&self, criteria: &SearchCriteria) -> Vec<&Book>;
}
