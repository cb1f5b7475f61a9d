//! Read and write the ID3 tags of MP3 recordings.
//!
//! Writing replaces both tag generations at once: a fixed-size ID3v2.3 tag
//! at the front of the file and a 128-byte ID3v1.1 trailer at the end, with
//! the audio in between carried over unchanged.

pub mod common;
pub mod id3;
pub mod upload;

pub use common::config::{WriteOptions, DEFAULT_TAG_LENGTH, MAX_TAG_LENGTH};
pub use common::error::{Result, TagError};
pub use id3::frames::FrameMap;
pub use id3::specs::{Encoding, FrameId};
pub use id3::tags::TagSnapshot;
pub use id3::{read_tags, rewrite_data, write_tags, write_tags_many, write_tags_with};
pub use upload::{tag_upload, UploadContext, UploadedFile};

#[cfg(feature = "python")]
mod python_bindings {
use std::path::PathBuf;

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::common::error::{EncodingOverflowError, TagPyError, TagTooSmallError, UploadError};
use crate::{FrameId, FrameMap, WriteOptions, DEFAULT_TAG_LENGTH};

/// Write tags to an MP3 file. `frames` is a list of `(frame_id, value)` pairs
/// such as `("TIT2", "Title")`, written in the given order.
#[pyfunction]
#[pyo3(signature = (path, frames, tag_length=DEFAULT_TAG_LENGTH, comment=None))]
fn write_tags(
    py: Python<'_>,
    path: PathBuf,
    frames: Vec<(String, String)>,
    tag_length: u32,
    comment: Option<String>,
) -> PyResult<()> {
    let mut map = FrameMap::new();
    for (id, value) in frames {
        map.insert(id.parse::<FrameId>()?, value);
    }
    let opts = WriteOptions::new()
        .tag_length(tag_length)
        .comment(comment.unwrap_or_default());

    py.detach(|| crate::id3::write_tags_with(&path, &map, &opts))?;
    Ok(())
}

/// Read tags from an MP3 file as a `{frame_id: value}` dict. ID3v1 values
/// fill in frames missing from the ID3v2 tag.
#[pyfunction]
fn read_tags<'py>(py: Python<'py>, path: PathBuf) -> PyResult<Bound<'py, PyDict>> {
    let snapshot = py.detach(|| crate::id3::read_tags(&path))?;
    let dict = PyDict::new(py);
    for (id, value) in snapshot.merged().iter() {
        dict.set_item(id.as_str(), value)?;
    }
    Ok(dict)
}

#[pymodule]
fn mp3tags(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(write_tags, m)?)?;
    m.add_function(wrap_pyfunction!(read_tags, m)?)?;

    m.add("DEFAULT_TAG_LENGTH", DEFAULT_TAG_LENGTH)?;
    m.add("TagError", m.py().get_type::<TagPyError>())?;
    m.add("EncodingOverflowError", m.py().get_type::<EncodingOverflowError>())?;
    m.add("TagTooSmallError", m.py().get_type::<TagTooSmallError>())?;
    m.add("UploadError", m.py().get_type::<UploadError>())?;

    Ok(())
}
} // mod python_bindings
