use crate::common::error::{TagError, Result};
use crate::id3::frames::FrameMap;
use crate::id3::header::MAX_SYNCHSAFE;
use crate::id3::specs::Encoding;
use crate::id3::writer;

/// Size of the ID3v2 tag body written when the caller does not choose one.
pub const DEFAULT_TAG_LENGTH: u32 = 1024;

/// Largest tag body the synchsafe size field can describe.
pub const MAX_TAG_LENGTH: u32 = MAX_SYNCHSAFE;

/// Options controlling how tags are written.
///
/// `tag_length` is the fixed size of the ID3v2 tag body (frames plus zero
/// padding). It must be at least [`min_tag_length`] of the frames written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    pub tag_length: u32,
    pub encoding: Encoding,
    /// Comment slot of the ID3v1 trailer.
    pub comment: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            tag_length: DEFAULT_TAG_LENGTH,
            encoding: Encoding::Latin1,
            comment: String::new(),
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag_length(mut self, tag_length: u32) -> Self {
        self.tag_length = tag_length;
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.tag_length > MAX_TAG_LENGTH {
            return Err(TagError::EncodingOverflow {
                value: self.tag_length as u64,
                limit: MAX_TAG_LENGTH as u64,
            });
        }
        Ok(())
    }
}

/// Serialized size of `frames`, the smallest usable `tag_length` for them.
pub fn min_tag_length(frames: &FrameMap, encoding: Encoding) -> Result<usize> {
    Ok(writer::render_frames(frames, encoding)?.len())
}
