use crate::common::error::{TagError, Result};
use crate::id3::frames::FrameMap;
use crate::id3::header::{encode_frame_length, encode_synchsafe, HEADER_LEN};
use crate::id3::specs::{encode_text, Encoding};

/// Serialize frames in the v2.3 layout: id, base-256 size, two flag bytes,
/// encoding byte, text.
pub fn render_frames(frames: &FrameMap, encoding: Encoding) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for (id, value) in frames.iter() {
        let text = encode_text(value, encoding);
        out.extend_from_slice(id.as_bytes());
        out.extend_from_slice(&encode_frame_length(text.len() + 1)?);
        out.extend_from_slice(&[0, 0, encoding as u8]);
        out.extend_from_slice(&text);
    }
    Ok(out)
}

/// Build a complete ID3v2 tag: 10-byte header plus a body of exactly
/// `tag_length` bytes (frames followed by zero padding).
pub fn build_v2_tag(
    header_prefix: [u8; 6],
    frames: &FrameMap,
    tag_length: u32,
    encoding: Encoding,
) -> Result<Vec<u8>> {
    let size = encode_synchsafe(tag_length)?;
    let frame_data = render_frames(frames, encoding)?;

    let body_len = tag_length as usize;
    if frame_data.len() > body_len {
        return Err(TagError::TagTooSmall {
            needed: frame_data.len(),
            available: body_len,
        });
    }

    let mut tag = Vec::with_capacity(HEADER_LEN + body_len);
    tag.extend_from_slice(&header_prefix);
    tag.extend_from_slice(&size);
    tag.extend_from_slice(&frame_data);
    tag.resize(HEADER_LEN + body_len, 0);

    Ok(tag)
}
