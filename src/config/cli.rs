use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "small-library")]
#[command(about = "Library circulation walkthrough: catalog, loans, limits and search")]
pub struct CliConfig {
    /// TOML file with library name, loan limits, books and users
    #[arg(short, long)]
    pub config: Option<String>,

    /// Extra books to import (columns: title,author,identifier,year,category)
    #[arg(long)]
    pub catalog_csv: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_non_empty_string("config", path)?;
        }
        if let Some(path) = &self.catalog_csv {
            validate_non_empty_string("catalog_csv", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["small-library"]);
        assert!(config.config.is_none());
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_all_flags() {
        let config = CliConfig::parse_from([
            "small-library",
            "--config",
            "library.toml",
            "--catalog-csv",
            "books.csv",
            "--format",
            "json",
            "-v",
            "--log-json",
        ]);
        assert_eq!(config.config.as_deref(), Some("library.toml"));
        assert_eq!(config.catalog_csv.as_deref(), Some("books.csv"));
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.verbose && config.log_json);
    }

    #[test]
    fn test_blank_path_is_rejected() {
        let config = CliConfig::parse_from(["small-library", "--config", " "]);
        assert!(config.validate().is_err());
    }
}
