use crate::config::toml_config::{BookEntry, LibraryConfig, LibrarySection, UserEntry};
use crate::core::{LoanLimits, UserClass};

fn book(title: &str, author: &str, identifier: &str, year: i32, category: &str) -> BookEntry {
    BookEntry {
        title: title.to_string(),
        author: author.to_string(),
        identifier: identifier.to_string(),
        year,
        category: category.to_string(),
    }
}

fn user(id: u32, name: &str, class: UserClass) -> UserEntry {
    UserEntry {
        id,
        name: name.to_string(),
        class,
    }
}

/// Built-in data used when no configuration file is given.
pub fn sample_config() -> LibraryConfig {
    LibraryConfig {
        library: LibrarySection {
            name: "Biblioteca Central".to_string(),
        },
        limits: LoanLimits::default(),
        books: vec![
            book(
                "Cien años de soledad",
                "Gabriel García Márquez",
                "978-0307474728",
                1967,
                "Ficción",
            ),
            book(
                "El principito",
                "Antoine de Saint-Exupéry",
                "978-0156012195",
                1943,
                "Infantil",
            ),
            book("1984", "George Orwell", "978-0451524935", 1949, "Ficción"),
            book(
                "Don Quijote",
                "Miguel de Cervantes",
                "978-8491050827",
                1605,
                "Clásico",
            ),
        ],
        users: vec![
            user(1, "Juan Pérez", UserClass::Student),
            user(2, "María López", UserClass::Faculty),
            user(3, "Carlos Ruiz", UserClass::External),
        ],
    }
}
