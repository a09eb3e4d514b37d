use crate::config::toml_config::{BookEntry, MAX_PUBLICATION_YEAR, MIN_PUBLICATION_YEAR};
use crate::core::{Book, Catalog};
use crate::utils::error::{LibraryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Reads `title,author,identifier,year,category` rows (with header) and appends them to `catalog`.
///
/// Rows get the same checks as `[[books]]` in the config file, and an identifier may not repeat
/// one already in the catalog or earlier in the file. Every row is checked before any book is
/// added, so a bad file leaves the catalog untouched.
pub fn import_books<C: Catalog, R: Read>(catalog: &mut C, reader: R) -> Result<usize> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut books = Vec::new();
    let mut seen = HashSet::new();
    for row in csv_reader.deserialize::<BookEntry>() {
        let entry = row?;
        validate_non_empty_string("books.title", &entry.title)?;
        validate_non_empty_string("books.author", &entry.author)?;
        validate_non_empty_string("books.identifier", &entry.identifier)?;
        validate_range(
            "books.year",
            entry.year,
            MIN_PUBLICATION_YEAR,
            MAX_PUBLICATION_YEAR,
        )?;

        if catalog.find_by_identifier(&entry.identifier).is_some()
            || !seen.insert(entry.identifier.clone())
        {
            tracing::warn!("Duplicate identifier {} in CSV import", entry.identifier);
            return Err(LibraryError::InvalidConfigValueError {
                field: "books.identifier".to_string(),
                value: entry.identifier,
                reason: "Duplicate value".to_string(),
            });
        }

        books.push(Book::from(&entry));
    }

    let imported = books.len();
    for book in books {
        tracing::debug!("Importing '{}' ({})", book.title, book.identifier);
        catalog.add(book);
    }

    Ok(imported)
}

pub fn import_books_from_file<C: Catalog, P: AsRef<Path>>(catalog: &mut C, path: P) -> Result<usize> {
    let file = std::fs::File::open(&path)?;
    let imported = import_books(catalog, file)?;
    tracing::info!("📚 Imported {} books from {}", imported, path.as_ref().display());
    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::InMemoryCatalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "title,author,identifier,year,category
Rayuela, Julio Cortázar ,978-8437604572,1963,Ficción
Ficciones,Jorge Luis Borges,978-0802130303,1944,Cuentos
";

    #[test]
    fn test_import_appends_in_file_order() {
        let mut catalog = InMemoryCatalog::new();

        let imported = import_books(&mut catalog, CSV.as_bytes()).unwrap();

        assert_eq!(imported, 2);
        assert_eq!(catalog.list()[0].title, "Rayuela");
        assert_eq!(catalog.list()[0].author, "Julio Cortázar");
        assert_eq!(catalog.list()[1].publication_year, 1944);
        assert!(catalog.list().iter().all(|book| book.is_available()));
    }

    #[test]
    fn test_malformed_year_is_csv_error_and_adds_nothing() {
        let mut catalog = InMemoryCatalog::new();
        let data = "title,author,identifier,year,category
Ok,A,1,2000,X
Broken,B,2,not-a-year,Y
";

        let result = import_books(&mut catalog, data.as_bytes());

        assert!(matches!(result, Err(LibraryError::CsvError(_))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_blank_identifier_is_rejected() {
        let mut catalog = InMemoryCatalog::new();
        let data = "title,author,identifier,year,category\nNo id,A, ,2000,X\n";

        assert!(matches!(
            import_books(&mut catalog, data.as_bytes()),
            Err(LibraryError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_blank_author_is_rejected() {
        let mut catalog = InMemoryCatalog::new();
        let data = "title,author,identifier,year,category\nAnon,  ,9,2000,X\n";

        let err = import_books(&mut catalog, data.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("books.author"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_identifier_already_in_catalog_is_rejected() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add(Book::new("Rayuela", "Julio Cortázar", "978-8437604572", 1963, "Ficción"));

        let err = import_books(&mut catalog, CSV.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            LibraryError::InvalidConfigValueError { ref value, .. } if value == "978-8437604572"
        ));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_identifier_repeated_within_file_is_rejected() {
        let mut catalog = InMemoryCatalog::new();
        let data = "title,author,identifier,year,category
Uno,A,1,2000,X
Otro,B,1,2001,Y
";

        assert!(matches!(
            import_books(&mut catalog, data.as_bytes()),
            Err(LibraryError::InvalidConfigValueError { .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_import_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(CSV.as_bytes()).unwrap();
        let mut catalog = InMemoryCatalog::new();

        assert_eq!(import_books_from_file(&mut catalog, temp_file.path()).unwrap(), 2);
        assert!(catalog.find_by_identifier("978-0802130303").is_some());
    }
}
