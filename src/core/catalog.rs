use crate::core::{Book, Catalog};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    books: Vec<Book>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        Self {
            books: books.into_iter().collect(),
        }
    }
}

impl Catalog for InMemoryCatalog {
    fn add(&mut self, book: Book) -> &Book {
        self.books.push(book);
        &self.books[self.books.len() - 1]
    }

    fn list(&self) -> &[Book] {
        &self.books
    }

    fn find_by_identifier(&self, identifier: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.identifier == identifier)
    }

    fn find_by_identifier_mut(&mut self, identifier: &str) -> Option<&mut Book> {
        self.books
            .iter_mut()
            .find(|book| book.identifier == identifier)
    }
}
