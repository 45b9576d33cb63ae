//! Error types for loading and rendering posts

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Posts directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Post not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front-matter in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid post identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
