//! Error handling for the seqcfg CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for seqcfg CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Invalid element #{index} ({kind}): {message}")]
    Element {
        index: usize,
        kind: String,
        message: String,
    },

    #[error("Rejected {domain} configuration: {}", .reasons.join("; "))]
    Rejected {
        domain: String,
        reasons: Vec<String>,
    },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn parse<S: Into<String>>(file: S, message: S) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn element<S: Into<String>>(index: usize, kind: S, message: S) -> Self {
        Self::Element {
            index,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn rejected<S: Into<String>>(domain: S, reasons: Vec<String>) -> Self {
        Self::Rejected {
            domain: domain.into(),
            reasons,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::Parse { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Every element file needs a top-level `domain` key\n\
                 • Each [[element]] table needs a `kind` key\n\
                 • Use 'seqcfg example --domain <DOMAIN>' to see a valid file",
            );
        }

        CliError::Element { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Error rates must lie between 0 and 1\n\
                 • Band diagonals need lower <= upper; gap scores must not be positive",
            );
        }

        CliError::Rejected { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Each kind may appear at most once per file\n\
                 • Use 'seqcfg table --domain <DOMAIN>' to see which kinds can be combined\n\
                 • Use --all-conflicts to list every conflict, not just the first",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your seqcfg.toml configuration file\n\
                 • Use 'seqcfg config --example' to generate a sample configuration",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
