use crate::config::toml_config::MAX_LOAN_LIMIT;
use crate::core::loan_service::LibraryService;
use crate::core::{Book, Catalog, Loan, LoanService, SearchCriteria, User, UserClass};
use crate::utils::error::{LibraryError, Result};
use serde::Serialize;
use std::io::Write;

const EXTRA_BOOK_IDENTIFIER: &str = "123456";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkthroughSummary {
    pub checkouts: usize,
    pub returns: usize,
    pub rejections: usize,
}

/// Scripted tour of the circulation rules: checkouts, a rejected checkout, search, a return and
/// the student loan limit. Needs one user of each class and at least two books.
pub struct Walkthrough {
    library_name: String,
    student: User,
    faculty: User,
    external: User,
    search_author: String,
}

fn first_of_class(users: &[User], class: UserClass) -> Result<User> {
    users
        .iter()
        .find(|user| user.class == class)
        .cloned()
        .ok_or_else(|| LibraryError::ConfigValidationError {
            field: "users".to_string(),
            message: format!("the walkthrough needs at least one {} user", class),
        })
}

impl Walkthrough {
    pub fn new(library_name: impl Into<String>, users: &[User]) -> Result<Self> {
        Ok(Self {
            library_name: library_name.into(),
            student: first_of_class(users, UserClass::Student)?,
            faculty: first_of_class(users, UserClass::Faculty)?,
            external: first_of_class(users, UserClass::External)?,
            search_author: "García".to_string(),
        })
    }

    pub fn with_search_author(mut self, author: impl Into<String>) -> Self {
        self.search_author = author.into();
        self
    }

    pub fn run<C: Catalog, W: Write>(
        &self,
        service: &mut LibraryService<C>,
        out: &mut W,
    ) -> Result<WalkthroughSummary> {
        let (first, second) = match service.catalog().list() {
            [first, second, ..] => (first.identifier.clone(), second.identifier.clone()),
            _ => {
                return Err(LibraryError::ConfigValidationError {
                    field: "books".to_string(),
                    message: "the walkthrough needs at least two books".to_string(),
                })
            }
        };
        let limit = service.limits().limit_for(self.student.class);
        if limit > MAX_LOAN_LIMIT {
            return Err(LibraryError::InvalidConfigValueError {
                field: format!("limits.{}", self.student.class),
                value: limit.to_string(),
                reason: format!("The limit probe supports at most {} loans", MAX_LOAN_LIMIT),
            });
        }
        let mut summary = WalkthroughSummary::default();

        writeln!(out, "=== {} ===\n", self.library_name)?;
        writeln!(out, "📚 Books:")?;
        for book in service.catalog().list() {
            writeln!(out, "- {} ({}) - {}", book.title, book.author, book.status_label())?;
        }

        writeln!(out, "\n--- Checkouts ---\n")?;
        tracing::info!("Running checkouts");
        for (user, identifier) in [
            (&self.student, &first),
            (&self.faculty, &second),
            (&self.external, &first),
        ] {
            self.checkout(service, user, identifier, out, &mut summary)?;
        }

        writeln!(out, "\n📚 Updated status:")?;
        write_status(service.catalog(), out)?;

        writeln!(out, "\n--- Search ---\n")?;
        let results = service.search(&SearchCriteria::new().author(self.search_author.as_str()));
        tracing::debug!("Search for author '{}' matched {} books", self.search_author, results.len());
        writeln!(out, "🔍 Books by author \"{}\":", self.search_author)?;
        for book in results {
            writeln!(out, "- {} ({})", book.title, book.author)?;
        }

        writeln!(out, "\n--- Returns ---\n")?;
        let title = title_of(service.catalog(), &first);
        match service.return_book(&self.student, &first) {
            Ok(()) => {
                summary.returns += 1;
                writeln!(out, "✅ Return succeeded: {}", title)?;
            }
            Err(e) if e.is_rejection() => {
                summary.rejections += 1;
                writeln!(out, "❌ Error: {}", e)?;
            }
            Err(e) => return Err(e),
        }

        writeln!(out, "\n📚 Final status:")?;
        write_status(service.catalog(), out)?;

        writeln!(
            out,
            "\n--- Loan limit for {} ({}, max {}) ---\n",
            self.student.name, self.student.class, limit
        )?;
        for attempt in 1..=limit + 1 {
            let identifier = next_available(service);
            match service.checkout(&self.student, &identifier) {
                Ok(_) => {
                    summary.checkouts += 1;
                    writeln!(out, "✅ Loan {} succeeded", attempt)?;
                }
                Err(e) if e.is_rejection() => {
                    summary.rejections += 1;
                    tracing::debug!("Limit probe stopped at attempt {}", attempt);
                    writeln!(out, "❌ Expected error: {}", e)?;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }

    fn checkout<C: Catalog, W: Write>(
        &self,
        service: &mut LibraryService<C>,
        user: &User,
        identifier: &str,
        out: &mut W,
        summary: &mut WalkthroughSummary,
    ) -> Result<()> {
        match service.checkout(user, identifier) {
            Ok(loan) => {
                summary.checkouts += 1;
                let title = title_of(service.catalog(), &loan.book_identifier);
                writeln!(out, "✅ Loan succeeded: {} to {}", title, loan.user.name)?;
            }
            Err(e) if e.is_rejection() => {
                summary.rejections += 1;
                tracing::warn!("Checkout rejected for user {}: {}", user.id, e);
                writeln!(out, "❌ Error: {}", e)?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

fn title_of<C: Catalog>(catalog: &C, identifier: &str) -> String {
    catalog
        .find_by_identifier(identifier)
        .map(|book| book.title.clone())
        .unwrap_or_else(|| identifier.to_string())
}

fn write_status<C: Catalog, W: Write>(catalog: &C, out: &mut W) -> Result<()> {
    for book in catalog.list() {
        writeln!(out, "- {} - {}", book.title, book.status_label())?;
    }
    Ok(())
}

/// First available book in catalog order, adding a filler book when everything is on loan.
fn next_available<C: Catalog>(service: &mut LibraryService<C>) -> String {
    if let Some(book) = service.catalog().list().iter().find(|book| book.is_available()) {
        return book.identifier.clone();
    }

    let count = service.catalog().len();
    let identifier = if service.catalog().find_by_identifier(EXTRA_BOOK_IDENTIFIER).is_none() {
        EXTRA_BOOK_IDENTIFIER.to_string()
    } else {
        format!("{}-{}", EXTRA_BOOK_IDENTIFIER, count)
    };
    tracing::debug!("Catalog exhausted, adding extra book {}", identifier);
    service
        .catalog_mut()
        .add(Book::new("Extra", "Autor", identifier, 2020, "Test"))
        .identifier
        .clone()
}

/// Writes the user-facing failure report: one `❌` line and one `💡` hint.
pub fn write_failure<W: Write>(e: &LibraryError, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "❌ {}", e.user_friendly_message())?;
    writeln!(out, "💡 {}", e.recovery_suggestion())
}

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub library: &'a str,
    pub books: &'a [Book],
    pub active_loans: &'a [Loan],
}

pub fn write_snapshot<C: Catalog, W: Write>(
    library: &str,
    service: &LibraryService<C>,
    out: &mut W,
) -> Result<()> {
    let snapshot = Snapshot {
        library,
        books: service.catalog().list(),
        active_loans: service.active_loans(),
    };
    serde_json::to_writer_pretty(&mut *out, &snapshot)?;
    writeln!(out)?;
    Ok(())
}
