//! # Codegraph Scanner
//!
//! Finds the Go source units of a project: every `.go` file under a root,
//! except test files and anything inside a `vendor` directory. Results are
//! sorted so repeated scans of the same tree agree.

mod error;
mod scanner;

pub use error::{Result, ScanError};
pub use scanner::{FileScanner, ScanOptions};
