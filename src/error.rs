use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    /// The name is not one of the listed markdown files.
    #[error("Invalid file selected: {0}")]
    InvalidFile(String),
    #[error("Your first line should be the title of the post (file={0})")]
    MissingTitle(String),
    #[error("Error reading markdown files: {0}")]
    Io(#[from] io::Error),
}
