use crate::id3::frames::FrameMap;
use crate::id3::specs::{self, genre_code, Encoding, FrameId, UNKNOWN_GENRE};

/// Size of an ID3v1 trailer.
pub const V1_LEN: usize = 128;

const TITLE: std::ops::Range<usize> = 3..33;
const ARTIST: std::ops::Range<usize> = 33..63;
const ALBUM: std::ops::Range<usize> = 63..93;
const YEAR: std::ops::Range<usize> = 93..97;
const COMMENT: std::ops::Range<usize> = 97..125;
const TRACK_MARKER: usize = 125;
const TRACK: usize = 126;
const GENRE: usize = 127;

/// Fields of an ID3v1.1 trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V1Tag {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub comment: String,
    /// 0 means no track number.
    pub track: u8,
    pub genre: u8,
}

impl Default for V1Tag {
    fn default() -> Self {
        V1Tag {
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            year: String::new(),
            comment: String::new(),
            track: 0,
            genre: UNKNOWN_GENRE,
        }
    }
}

impl V1Tag {
    /// Collect the v1 fields from a frame set. The band frame has no v1 slot.
    pub fn from_frames(frames: &FrameMap, comment: &str) -> Self {
        let text = |id| frames.get(id).unwrap_or("").to_string();
        V1Tag {
            title: text(FrameId::Title),
            artist: text(FrameId::Artist),
            album: text(FrameId::Album),
            year: text(FrameId::Year),
            comment: comment.to_string(),
            track: frames.get(FrameId::Track).map(parse_track).unwrap_or(0),
            genre: frames.get(FrameId::Genre).map(genre_code).unwrap_or(UNKNOWN_GENRE),
        }
    }

    pub fn render(&self) -> [u8; V1_LEN] {
        let mut tag = [0u8; V1_LEN];
        tag[0..3].copy_from_slice(b"TAG");
        write_field(&mut tag[TITLE], &self.title, 0);
        write_field(&mut tag[ARTIST], &self.artist, 0);
        write_field(&mut tag[ALBUM], &self.album, 0);
        write_field(&mut tag[YEAR], &self.year, b' ');
        write_field(&mut tag[COMMENT], &self.comment, b' ');
        tag[TRACK_MARKER] = 0;
        tag[TRACK] = self.track;
        tag[GENRE] = self.genre;
        tag
    }

    /// Non-empty fields as frames, in the default frame order.
    pub fn to_frames(&self) -> FrameMap {
        let mut frames = FrameMap::new();
        let mut put = |id, value: &str| {
            if !value.is_empty() {
                frames.insert(id, value);
            }
        };
        put(FrameId::Title, &self.title);
        put(FrameId::Artist, &self.artist);
        put(FrameId::Album, &self.album);
        if let Some(name) = specs::genre_name(self.genre) {
            put(FrameId::Genre, name);
        }
        if self.track != 0 {
            put(FrameId::Track, &self.track.to_string());
        }
        put(FrameId::Year, &self.year);
        frames
    }
}

/// Build the 128-byte ID3v1 trailer for `frames`.
pub fn make_id3v1(frames: &FrameMap, comment: &str) -> [u8; V1_LEN] {
    V1Tag::from_frames(frames, comment).render()
}

/// Offset of a trailing ID3v1 tag in `data`, if present.
pub fn find_id3v1(data: &[u8]) -> Option<usize> {
    if data.len() < V1_LEN {
        return None;
    }
    let offset = data.len() - V1_LEN;
    if &data[offset..offset + 3] == b"TAG" {
        Some(offset)
    } else {
        None
    }
}

/// Parse the ID3v1 trailer at the end of `data`.
pub fn parse_id3v1(data: &[u8]) -> Option<V1Tag> {
    let tag = &data[find_id3v1(data)?..];

    // v1.1 stores the track in the last comment byte behind a zero marker.
    let (comment, track) = if tag[TRACK_MARKER] == 0 && tag[TRACK] != 0 {
        (&tag[COMMENT], tag[TRACK])
    } else {
        (&tag[COMMENT.start..GENRE], 0)
    };

    Some(V1Tag {
        title: read_field(&tag[TITLE]),
        artist: read_field(&tag[ARTIST]),
        album: read_field(&tag[ALBUM]),
        year: read_field(&tag[YEAR]),
        comment: read_field(comment),
        track,
        genre: tag[GENRE],
    })
}

/// Leading number of a track value such as `"3"` or `"3/12"`.
fn parse_track(text: &str) -> u8 {
    text.split('/')
        .next()
        .and_then(|n| n.trim().parse::<u8>().ok())
        .unwrap_or(0)
}

/// Copy `text` into a fixed slot, cutting it at the slot width and filling
/// the rest with `pad`.
fn write_field(dest: &mut [u8], text: &str, pad: u8) {
    let bytes = specs::encode_text(text, Encoding::Latin1);
    let len = bytes.len().min(dest.len());
    dest[..len].copy_from_slice(&bytes[..len]);
    dest[len..].fill(pad);
}

fn read_field(data: &[u8]) -> String {
    let end = memchr::memchr(0, data).unwrap_or(data.len());
    specs::decode_text(&data[..end], Encoding::Latin1)
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> FrameMap {
        let mut frames = FrameMap::new();
        frames.insert(FrameId::Title, "Morning Session");
        frames.insert(FrameId::Artist, "Quartet");
        frames.insert(FrameId::Band, "House Band");
        frames.insert(FrameId::Album, "Live Takes");
        frames.insert(FrameId::Genre, "Jazz");
        frames.insert(FrameId::Track, "4/10");
        frames.insert(FrameId::Year, "1999");
        frames
    }

    #[test]
    fn layout_is_128_bytes() {
        let tag = make_id3v1(&frames(), "mixed");
        assert_eq!(tag.len(), 128);
        assert_eq!(&tag[0..3], b"TAG");
        assert_eq!(&tag[3..18], b"Morning Session");
        assert!(tag[18..33].iter().all(|&b| b == 0));
        assert_eq!(&tag[33..40], b"Quartet");
        assert_eq!(&tag[63..73], b"Live Takes");
        assert_eq!(&tag[93..97], b"1999");
        assert_eq!(&tag[97..102], b"mixed");
        assert!(tag[102..125].iter().all(|&b| b == b' '));
        assert_eq!(tag[125], 0);
        assert_eq!(tag[126], 4);
        assert_eq!(tag[127], 8);
    }

    #[test]
    fn long_names_cut_to_slot() {
        let mut frames = FrameMap::new();
        let long = "A".repeat(45);
        frames.insert(FrameId::Title, long.as_str());
        frames.insert(FrameId::Artist, long.as_str());
        frames.insert(FrameId::Album, long.as_str());
        frames.insert(FrameId::Year, "199912");
        let tag = make_id3v1(&frames, &"c".repeat(40));

        assert_eq!(&tag[3..33], "A".repeat(30).as_bytes());
        assert_eq!(&tag[33..63], "A".repeat(30).as_bytes());
        assert_eq!(&tag[63..93], "A".repeat(30).as_bytes());
        assert_eq!(&tag[93..97], b"1999");
        assert_eq!(&tag[97..125], "c".repeat(28).as_bytes());
        assert_eq!(tag[125], 0);
    }

    #[test]
    fn short_year_is_space_padded() {
        let mut frames = FrameMap::new();
        frames.insert(FrameId::Year, "99");
        let tag = make_id3v1(&frames, "");
        assert_eq!(&tag[93..97], b"99  ");
        assert!(tag[97..125].iter().all(|&b| b == b' '));
    }

    #[test]
    fn missing_track_and_genre() {
        let tag = make_id3v1(&FrameMap::new(), "");
        assert_eq!(tag[126], 0);
        assert_eq!(tag[127], UNKNOWN_GENRE);
    }

    #[test]
    fn unparsable_track_is_zero() {
        assert_eq!(parse_track("B-side"), 0);
        assert_eq!(parse_track("300"), 0);
        assert_eq!(parse_track(" 7 / 9"), 7);
    }

    #[test]
    fn parse_written_tag() {
        let mut data = b"audio".to_vec();
        data.extend_from_slice(&make_id3v1(&frames(), "note"));

        assert_eq!(find_id3v1(&data), Some(5));
        let v1 = parse_id3v1(&data).unwrap();
        assert_eq!(v1.title, "Morning Session");
        assert_eq!(v1.artist, "Quartet");
        assert_eq!(v1.album, "Live Takes");
        assert_eq!(v1.year, "1999");
        assert_eq!(v1.comment, "note");
        assert_eq!(v1.track, 4);
        assert_eq!(v1.genre, 8);

        let back = v1.to_frames();
        assert_eq!(back.get(FrameId::Genre), Some("Jazz"));
        assert_eq!(back.get(FrameId::Track), Some("4"));
        assert!(!back.contains(FrameId::Band));
    }

    #[test]
    fn v1_0_comment_uses_full_slot() {
        let mut tag = V1Tag::default().render();
        tag[97..127].copy_from_slice(&[b'x'; 30]);
        let v1 = parse_id3v1(&tag).unwrap();
        assert_eq!(v1.comment.len(), 30);
        assert_eq!(v1.track, 0);
    }

    #[test]
    fn no_trailer() {
        assert!(find_id3v1(&[0u8; 127]).is_none());
        assert!(parse_id3v1(&[0u8; 200]).is_none());
    }
}
