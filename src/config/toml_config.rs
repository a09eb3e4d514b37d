use crate::core::{Book, Catalog, LoanLimits, User, UserClass};
use crate::utils::error::{LibraryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_unique, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const MIN_PUBLICATION_YEAR: i32 = -3000;
pub const MAX_PUBLICATION_YEAR: i32 = 2100;
pub const MAX_LOAN_LIMIT: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub library: LibrarySection,
    #[serde(default)]
    pub limits: LoanLimits,
    #[serde(default)]
    pub books: Vec<BookEntry>,
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySection {
    pub name: String,
}

impl Default for LibrarySection {
    fn default() -> Self {
        Self {
            name: "Library".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookEntry {
    pub title: String,
    pub author: String,
    pub identifier: String,
    pub year: i32,
    pub category: String,
}

impl From<&BookEntry> for Book {
    fn from(entry: &BookEntry) -> Self {
        Book::new(
            entry.title.clone(),
            entry.author.clone(),
            entry.identifier.clone(),
            entry.year,
            entry.category.clone(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntry {
    pub id: u32,
    pub name: String,
    pub class: UserClass,
}

impl From<&UserEntry> for User {
    fn from(entry: &UserEntry) -> Self {
        User::new(entry.id, entry.name.clone(), entry.class)
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").unwrap())
}

impl LibraryConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LibraryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LibraryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("library.name", &self.library.name)?;

        for class in UserClass::ALL {
            validate_range(
                &format!("limits.{}", class),
                self.limits.limit_for(class),
                1,
                MAX_LOAN_LIMIT,
            )?;
        }

        for book in &self.books {
            validate_non_empty_string("books.title", &book.title)?;
            validate_non_empty_string("books.author", &book.author)?;
            validate_non_empty_string("books.identifier", &book.identifier)?;
            validate_range(
                "books.year",
                book.year,
                MIN_PUBLICATION_YEAR,
                MAX_PUBLICATION_YEAR,
            )?;
        }
        validate_unique(
            "books.identifier",
            self.books.iter().map(|book| &book.identifier),
        )?;

        for user in &self.users {
            validate_non_empty_string("users.name", &user.name)?;
        }
        validate_unique("users.id", self.users.iter().map(|user| &user.id))?;

        Ok(())
    }

    /// Appends the configured books to `catalog`, returning how many were added.
    pub fn populate<C: Catalog>(&self, catalog: &mut C) -> usize {
        for entry in &self.books {
            catalog.add(Book::from(entry));
        }
        self.books.len()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.iter().map(User::from).collect()
    }
}

impl Validate for LibraryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::InMemoryCatalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[library]
name = "Biblioteca Central"

[limits]
student = 4

[[books]]
title = "1984"
author = "George Orwell"
identifier = "978-0451524935"
year = 1949
category = "Ficción"

[[users]]
id = 1
name = "Juan Pérez"
class = "student"

[[users]]
id = 2
name = "María López"
class = "faculty"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = LibraryConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.library.name, "Biblioteca Central");
        assert_eq!(config.limits.student, 4);
        // Unspecified limits keep their defaults.
        assert_eq!(config.limits.faculty, 5);
        assert_eq!(config.limits.external, 2);
        assert_eq!(config.books.len(), 1);
        assert_eq!(config.users()[1].class, UserClass::Faculty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = LibraryConfig::from_toml_str("").unwrap();
        assert_eq!(config.limits, LoanLimits::default());
        assert!(config.books.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SMALL_LIBRARY_TEST_NAME", "Sala de Lectura");

        let config = LibraryConfig::from_toml_str(
            r#"
[library]
name = "${SMALL_LIBRARY_TEST_NAME}"
"#,
        )
        .unwrap();
        assert_eq!(config.library.name, "Sala de Lectura");

        std::env::remove_var("SMALL_LIBRARY_TEST_NAME");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let config = LibraryConfig::from_toml_str(
            r#"
[library]
name = "${SMALL_LIBRARY_SURELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(config.library.name, "${SMALL_LIBRARY_SURELY_UNSET}");
    }

    #[test]
    fn test_unknown_user_class_is_a_parse_error() {
        let result = LibraryConfig::from_toml_str(
            r#"
[[users]]
id = 1
name = "X"
class = "visitor"
"#,
        );
        assert!(matches!(
            result,
            Err(LibraryError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation_rejects_zero_limit() {
        let config = LibraryConfig::from_toml_str("[limits]\nexternal = 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("limits.external"));
    }

    #[test]
    fn test_config_validation_rejects_oversized_limit() {
        let config = LibraryConfig::from_toml_str("[limits]\nstudent = 200000\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("limits.student"));

        let config = LibraryConfig::from_toml_str("[limits]\nstudent = 100\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_duplicates() {
        let mut config = LibraryConfig::from_toml_str(BASIC).unwrap();
        config.users.push(config.users[0].clone());
        assert!(config.validate().is_err());

        let mut config = LibraryConfig::from_toml_str(BASIC).unwrap();
        config.books.push(config.books[0].clone());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_populate_catalog() {
        let config = LibraryConfig::from_toml_str(BASIC).unwrap();
        let mut catalog = InMemoryCatalog::new();

        assert_eq!(config.populate(&mut catalog), 1);
        let book = catalog.find_by_identifier("978-0451524935").unwrap();
        assert_eq!(book.publication_year, 1949);
        assert!(book.is_available());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = LibraryConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.library.name, "Biblioteca Central");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            LibraryConfig::from_file("/definitely/not/here.toml"),
            Err(LibraryError::IoError(_))
        ));
    }
}
