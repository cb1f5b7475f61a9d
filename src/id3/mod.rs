pub mod frames;
pub mod header;
pub mod id3v1;
pub mod specs;
pub mod tags;
pub mod writer;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::common::config::WriteOptions;
use crate::common::error::{TagError, Result};
use crate::common::util;
use crate::id3::frames::FrameMap;
use crate::id3::header::{ID3Header, DEFAULT_HEADER_PREFIX};
use crate::id3::tags::TagSnapshot;

/// The pieces of an MP3 file around its tags.
#[derive(Debug, Clone, Copy)]
struct Layout {
    prefix: [u8; 6],
    payload: (usize, usize),
}

fn split(data: &[u8]) -> Result<Layout> {
    let (prefix, start) = match ID3Header::parse(data) {
        Some(h) => {
            if h.full_size() > data.len() {
                return Err(TagError::InvalidData(format!(
                    "ID3v2 tag size {} exceeds file length {}",
                    h.size,
                    data.len()
                )));
            }
            (h.rewrite_prefix(), h.full_size())
        }
        None => (DEFAULT_HEADER_PREFIX, 0),
    };

    let end = match id3v1::find_id3v1(data) {
        Some(offset) if offset >= start => offset,
        _ => data.len(),
    };

    Ok(Layout {
        prefix,
        payload: (start, end),
    })
}

/// Rewrite the tags of an in-memory MP3 file.
///
/// Returns the new file as `[v2 tag][payload][v1 tag]`, where the v2 tag is
/// `10 + opts.tag_length` bytes and the v1 tag is 128 bytes.
pub fn rewrite_data(data: &[u8], frames: &FrameMap, opts: &WriteOptions) -> Result<Vec<u8>> {
    opts.validate()?;
    let layout = split(data)?;
    let (start, end) = layout.payload;
    debug!(
        old_tag = start,
        payload = end - start,
        had_v1 = end < data.len(),
        "rewriting tags"
    );

    let v2 = writer::build_v2_tag(layout.prefix, frames, opts.tag_length, opts.encoding)?;
    let v1 = id3v1::make_id3v1(frames, &opts.comment);

    let mut out = Vec::with_capacity(v2.len() + (end - start) + v1.len());
    out.extend_from_slice(&v2);
    out.extend_from_slice(&data[start..end]);
    out.extend_from_slice(&v1);
    Ok(out)
}

/// Replace the ID3v2 and ID3v1 tags of the file at `path`.
///
/// Callers must not run two rewrites of the same path at once.
pub fn write_tags(path: impl AsRef<Path>, frames: &FrameMap) -> Result<()> {
    write_tags_with(path, frames, &WriteOptions::default())
}

pub fn write_tags_with(path: impl AsRef<Path>, frames: &FrameMap, opts: &WriteOptions) -> Result<()> {
    let path = path.as_ref();
    let data = util::read_file(path)?;
    let out = rewrite_data(&data, frames, opts)?;
    util::atomic_write(path, &out)?;
    info!(path = %path.display(), frames = frames.len(), bytes = out.len(), "tags written");
    Ok(())
}

/// Rewrite several distinct files in parallel.
///
/// Results line up with `jobs`. A path seen earlier in the same batch fails
/// with [`TagError::DuplicatePath`] instead of racing the first rewrite.
pub fn write_tags_many(jobs: &[(PathBuf, FrameMap)], opts: &WriteOptions) -> Vec<Result<()>> {
    use rayon::prelude::*;

    let mut seen = HashSet::with_capacity(jobs.len());
    let first: Vec<bool> = jobs.iter().map(|(p, _)| seen.insert(p.as_path())).collect();

    jobs.par_iter()
        .zip(first.par_iter())
        .map(|((path, frames), &is_first)| {
            if is_first {
                write_tags_with(path, frames, opts)
            } else {
                Err(TagError::DuplicatePath(path.clone()))
            }
        })
        .collect()
}

/// Read the ID3v2 and ID3v1 tags of the file at `path`.
pub fn read_tags(path: impl AsRef<Path>) -> Result<TagSnapshot> {
    let data = util::read_file(path.as_ref())?;
    Ok(TagSnapshot::from_data(&data))
}
