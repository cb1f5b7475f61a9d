use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("value {value} does not fit the encoding (limit {limit})")]
    EncodingOverflow { value: u64, limit: u64 },

    #[error("frames need {needed} bytes but the tag only holds {available}")]
    TagTooSmall { needed: usize, available: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("path appears more than once in a batch: {}", .0.display())]
    DuplicatePath(PathBuf),

    #[error("Upload error: {0}")]
    Upload(String),
}

impl TagError {
    /// Map an I/O error on `path`, singling out missing files.
    pub fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            TagError::NotFound(path.to_path_buf())
        } else {
            TagError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, TagError>;

#[cfg(feature = "python")]
mod py {
    use super::TagError;
    use pyo3::create_exception;
    use pyo3::exceptions::PyException;

    create_exception!(mp3tags, TagPyError, PyException);
    create_exception!(mp3tags, EncodingOverflowError, TagPyError);
    create_exception!(mp3tags, TagTooSmallError, TagPyError);
    create_exception!(mp3tags, UploadError, TagPyError);

    impl From<TagError> for pyo3::PyErr {
        fn from(err: TagError) -> pyo3::PyErr {
            let msg = err.to_string();
            match err {
                TagError::Io(_) => pyo3::exceptions::PyIOError::new_err(msg),
                TagError::NotFound(_) => pyo3::exceptions::PyFileNotFoundError::new_err(msg),
                TagError::EncodingOverflow { .. } => EncodingOverflowError::new_err(msg),
                TagError::TagTooSmall { .. } => TagTooSmallError::new_err(msg),
                TagError::InvalidData(_) => pyo3::exceptions::PyValueError::new_err(msg),
                TagError::DuplicatePath(_) => pyo3::exceptions::PyValueError::new_err(msg),
                TagError::Upload(_) => UploadError::new_err(msg),
            }
        }
    }
}

#[cfg(feature = "python")]
pub use py::{EncodingOverflowError, TagPyError, TagTooSmallError, UploadError};
