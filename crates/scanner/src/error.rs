use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid project root: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}
