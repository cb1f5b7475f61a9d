//! Uploaded files handed over by the web layer.
//!
//! The web layer builds an [`UploadContext`] per request and passes it in
//! explicitly; nothing here reads process-wide state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::config::WriteOptions;
use crate::common::error::{TagError, Result};
use crate::id3::{self, frames::FrameMap};

/// One uploaded file as received by the web layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-side file name.
    pub name: String,
    pub size: u64,
    /// Where the upload was stored on this machine.
    pub tmp_path: PathBuf,
    pub mime_type: String,
}

impl UploadedFile {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        tmp_path: impl Into<PathBuf>,
        mime_type: impl Into<String>,
    ) -> Self {
        UploadedFile {
            name: name.into(),
            size,
            tmp_path: tmp_path.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Whether the upload looks like an MP3, by MIME type or extension.
    pub fn is_mp3(&self) -> bool {
        let mime = self.mime_type.to_ascii_lowercase();
        if matches!(mime.as_str(), "audio/mpeg" | "audio/mp3" | "audio/mpeg3" | "audio/x-mpeg-3") {
            return true;
        }
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("mp3"))
    }
}

/// Files of a single request, keyed by form field name.
#[derive(Debug, Clone, Default)]
pub struct UploadContext {
    files: HashMap<String, UploadedFile>,
}

impl UploadContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, file: UploadedFile) -> Option<UploadedFile> {
        self.files.insert(field.into(), file)
    }

    pub fn get(&self, field: &str) -> Option<&UploadedFile> {
        self.files.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Write tags into the MP3 uploaded under `field`, in its temporary location.
pub fn tag_upload<'a>(
    ctx: &'a UploadContext,
    field: &str,
    frames: &FrameMap,
    opts: &WriteOptions,
) -> Result<&'a UploadedFile> {
    let file = ctx
        .get(field)
        .ok_or_else(|| TagError::Upload(format!("no file uploaded for field '{}'", field)))?;

    if !file.is_mp3() {
        return Err(TagError::Upload(format!(
            "'{}' is not an MP3 file ({})",
            file.name, file.mime_type
        )));
    }

    debug!(field, name = %file.name, tmp = %file.tmp_path.display(), "tagging upload");
    id3::write_tags_with(&file.tmp_path, frames, opts)?;
    Ok(file)
}
