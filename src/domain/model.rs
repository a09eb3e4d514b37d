use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Unique identifier, usually the ISBN. Uniqueness is the caller's responsibility.
    pub identifier: String,
    #[serde(rename = "year")]
    pub publication_year: i32,
    pub category: String,
    #[serde(default = "default_available")]
    available: bool,
}

fn default_available() -> bool {
    true
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        identifier: impl Into<String>,
        publication_year: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            identifier: identifier.into(),
            publication_year,
            category: category.into(),
            available: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn mark_loaned(&mut self) {
        self.available = false;
    }

    pub fn mark_available(&mut self) {
        self.available = true;
    }

    pub fn status_label(&self) -> &'static str {
        if self.available {
            "Available"
        } else {
            "On loan"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserClass {
    Student,
    Faculty,
    External,
}

impl UserClass {
    pub const ALL: [UserClass; 3] = [UserClass::Student, UserClass::Faculty, UserClass::External];

    pub const fn default_limit(self) -> usize {
        match self {
            UserClass::Student => 3,
            UserClass::Faculty => 5,
            UserClass::External => 2,
        }
    }
}

impl fmt::Display for UserClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserClass::Student => "student",
            UserClass::Faculty => "faculty",
            UserClass::External => "external",
        };
        f.write_str(name)
    }
}

/// Immutable once built; loans keep their own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub class: UserClass,
}

impl User {
    pub fn new(id: u32, name: impl Into<String>, class: UserClass) -> Self {
        Self {
            id,
            name: name.into(),
            class,
        }
    }
}

/// Per-class borrowing limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanLimits {
    pub student: usize,
    pub faculty: usize,
    pub external: usize,
}

impl LoanLimits {
    pub fn limit_for(&self, class: UserClass) -> usize {
        match class {
            UserClass::Student => self.student,
            UserClass::Faculty => self.faculty,
            UserClass::External => self.external,
        }
    }
}

impl Default for LoanLimits {
    fn default() -> Self {
        Self {
            student: UserClass::Student.default_limit(),
            faculty: UserClass::Faculty.default_limit(),
            external: UserClass::External.default_limit(),
        }
    }
}

/// An active loan. Only the book identifier is held; availability is read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub user: User,
    pub book_identifier: String,
    pub loaned_at: DateTime<Utc>,
}

impl Loan {
    pub fn new(user: User, book_identifier: impl Into<String>) -> Self {
        Self {
            user,
            book_identifier: book_identifier.into(),
            loaned_at: Utc::now(),
        }
    }

    pub fn matches(&self, user_id: u32, book_identifier: &str) -> bool {
        self.user.id == user_id && self.book_identifier == book_identifier
    }
}

/// Search filters. `None` and empty strings are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn matches(&self, book: &Book) -> bool {
        field_matches(&book.title, self.title.as_deref())
            && field_matches(&book.author, self.author.as_deref())
            && field_matches(&book.category, self.category.as_deref())
    }
}

fn field_matches(value: &str, criterion: Option<&str>) -> bool {
    match criterion {
        Some(needle) if !needle.is_empty() => {
            value.to_lowercase().contains(&needle.to_lowercase())
        }
        _ => true,
    }
}
