use tracing::{debug, warn};

use crate::id3::frames::FrameMap;
use crate::id3::header::{decode_frame_length, ID3Header, HEADER_LEN};
use crate::id3::id3v1::{self, V1Tag};
use crate::id3::specs::{decode_text, trim_terminator, Encoding, FrameId};

/// Tags found in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSnapshot {
    pub header: Option<ID3Header>,
    /// ID3v2 text frames this crate knows, in file order.
    pub frames: FrameMap,
    pub v1: Option<V1Tag>,
}

impl TagSnapshot {
    /// Parse both tag generations from an in-memory file.
    pub fn from_data(data: &[u8]) -> Self {
        let header = ID3Header::parse(data);
        let frames = match &header {
            Some(h) => {
                let end = h.body_end().min(data.len());
                if h.body_end() > data.len() {
                    warn!(size = h.size, len = data.len(), "ID3v2 tag runs past end of file");
                }
                read_frames(&data[HEADER_LEN..end])
            }
            None => FrameMap::new(),
        };
        TagSnapshot {
            header,
            frames,
            v1: id3v1::parse_id3v1(data),
        }
    }

    /// v2 frames, falling back to the v1 trailer for anything v2 lacks.
    pub fn merged(&self) -> FrameMap {
        let mut frames = self.frames.clone();
        if let Some(v1) = &self.v1 {
            for (id, value) in v1.to_frames().iter() {
                if !frames.contains(id) {
                    frames.insert(id, value);
                }
            }
        }
        frames
    }
}

/// Parse v2.3 frames from a tag body.
///
/// Stops at padding or at the first frame that does not fit. Frames with an
/// id outside [`FrameId`] are skipped.
pub fn read_frames(body: &[u8]) -> FrameMap {
    let mut frames = FrameMap::new();
    let mut offset = 0usize;

    while offset + 10 <= body.len() {
        if body[offset] == 0 {
            break;
        }

        let id_bytes = &body[offset..offset + 4];
        if !id_bytes.iter().all(|&b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
            warn!(offset, "invalid frame id, stopping");
            break;
        }

        let mut size = [0u8; 4];
        size.copy_from_slice(&body[offset + 4..offset + 8]);
        let size = decode_frame_length(&size) as usize;
        offset += 10;

        if size == 0 || size > body.len() - offset {
            warn!(size, offset, "frame size out of range, stopping");
            break;
        }

        let data = &body[offset..offset + size];
        offset += size;

        let Some(id) = FrameId::from_bytes(id_bytes) else {
            debug!(id = %String::from_utf8_lossy(id_bytes), "skipping frame");
            continue;
        };

        match Encoding::from_byte(data[0]) {
            Ok(encoding) => {
                let text = decode_text(trim_terminator(&data[1..], encoding), encoding);
                frames.insert(id, text);
            }
            Err(e) => warn!(%id, error = %e, "skipping frame"),
        }
    }

    frames
}
