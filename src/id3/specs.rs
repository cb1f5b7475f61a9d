use std::fmt;

use crate::common::error::{TagError, Result};

/// Frames this crate reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameId {
    Title,
    Artist,
    Band,
    Album,
    Genre,
    Track,
    Year,
}

impl FrameId {
    /// Every frame, in the order tags are written by default.
    pub const ALL: [FrameId; 7] = [
        FrameId::Title,
        FrameId::Artist,
        FrameId::Band,
        FrameId::Album,
        FrameId::Genre,
        FrameId::Track,
        FrameId::Year,
    ];

    pub fn as_bytes(&self) -> &'static [u8; 4] {
        match self {
            FrameId::Title => b"TIT2",
            FrameId::Artist => b"TPE1",
            FrameId::Band => b"TPE2",
            FrameId::Album => b"TALB",
            FrameId::Genre => b"TCON",
            FrameId::Track => b"TRCK",
            FrameId::Year => b"TYER",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameId::Title => "TIT2",
            FrameId::Artist => "TPE1",
            FrameId::Band => "TPE2",
            FrameId::Album => "TALB",
            FrameId::Genre => "TCON",
            FrameId::Track => "TRCK",
            FrameId::Year => "TYER",
        }
    }

    pub fn from_bytes(id: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_bytes() == id)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FrameId {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self> {
        FrameId::from_bytes(s.as_bytes())
            .ok_or_else(|| TagError::InvalidData(format!("unknown frame id: {}", s)))
    }
}

/// Text encoding types used in ID3v2 frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Encoding {
    Latin1 = 0,
    Utf16 = 1,
    Utf16Be = 2,
    Utf8 = 3,
}

impl Encoding {
    pub fn from_byte(b: u8) -> Result<Self> {
        match b {
            0 => Ok(Encoding::Latin1),
            1 => Ok(Encoding::Utf16),
            2 => Ok(Encoding::Utf16Be),
            3 => Ok(Encoding::Utf8),
            _ => Err(TagError::InvalidData(format!("Invalid encoding byte: {}", b))),
        }
    }
}

/// Decode text from bytes using the specified encoding.
pub fn decode_text(data: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Latin1 => data.iter().map(|&b| b as char).collect(),
        Encoding::Utf16 => {
            if data.len() < 2 {
                return String::new();
            }
            let (decoder, start) = if data[0] == 0xFF && data[1] == 0xFE {
                (encoding_rs::UTF_16LE, 2)
            } else if data[0] == 0xFE && data[1] == 0xFF {
                (encoding_rs::UTF_16BE, 2)
            } else {
                (encoding_rs::UTF_16LE, 0)
            };
            let (text, _) = decoder.decode_without_bom_handling(&data[start..]);
            text.into_owned()
        }
        Encoding::Utf16Be => {
            let (text, _) = encoding_rs::UTF_16BE.decode_without_bom_handling(data);
            text.into_owned()
        }
        Encoding::Utf8 => String::from_utf8_lossy(data).into_owned(),
    }
}

/// Encode text to bytes using the specified encoding.
pub fn encode_text(text: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Latin1 => text
            .chars()
            .map(|c| if c as u32 <= 0xFF { c as u8 } else { b'?' })
            .collect(),
        Encoding::Utf16 => {
            let mut out = vec![0xFF, 0xFE];
            for unit in text.encode_utf16() {
                out.extend_from_slice(&unit.to_le_bytes());
            }
            out
        }
        Encoding::Utf16Be => text
            .encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect(),
        Encoding::Utf8 => text.as_bytes().to_vec(),
    }
}

/// Strip the trailing terminator(s) some writers append to text frames.
pub fn trim_terminator(data: &[u8], encoding: Encoding) -> &[u8] {
    match encoding {
        Encoding::Latin1 | Encoding::Utf8 => match memchr::memchr(0, data) {
            Some(pos) => &data[..pos],
            None => data,
        },
        Encoding::Utf16 | Encoding::Utf16Be => {
            let mut i = 0;
            while i + 1 < data.len() {
                if data[i] == 0 && data[i + 1] == 0 {
                    return &data[..i];
                }
                i += 2;
            }
            data
        }
    }
}

/// ID3v1 genre list (index → genre name).
pub const GENRES: &[&str] = &[
    "Blues", "Classic Rock", "Country", "Dance", "Disco", "Funk", "Grunge",
    "Hip-Hop", "Jazz", "Metal", "New Age", "Oldies", "Other", "Pop", "R&B",
    "Rap", "Reggae", "Rock", "Techno", "Industrial", "Alternative", "Ska",
    "Death Metal", "Pranks", "Soundtrack", "Euro-Techno", "Ambient",
    "Trip-Hop", "Vocal", "Jazz+Funk", "Fusion", "Trance", "Classical",
    "Instrumental", "Acid", "House", "Game", "Sound Clip", "Gospel", "Noise",
    "AlternRock", "Bass", "Soul", "Punk", "Space", "Meditative",
    "Instrumental Pop", "Instrumental Rock", "Ethnic", "Gothic", "Darkwave",
    "Techno-Industrial", "Electronic", "Pop-Folk", "Eurodance", "Dream",
    "Southern Rock", "Comedy", "Cult", "Gangsta", "Top 40", "Christian Rap",
    "Pop/Funk", "Jungle", "Native American", "Cabaret", "New Wave",
    "Psychedelic", "Rave", "Showtunes", "Trailer", "Lo-Fi", "Tribal",
    "Acid Punk", "Acid Jazz", "Polka", "Retro", "Musical", "Rock & Roll",
    "Hard Rock", "Folk", "Folk-Rock", "National Folk", "Swing", "Fast Fusion",
    "Bebop", "Latin", "Revival", "Celtic", "Bluegrass", "Avantgarde",
    "Gothic Rock", "Progressive Rock", "Psychedelic Rock", "Symphonic Rock",
    "Slow Rock", "Big Band", "Chorus", "Easy Listening", "Acoustic", "Humour",
    "Speech", "Chanson", "Opera", "Chamber Music", "Sonata", "Symphony",
    "Booty Bass", "Primus", "Porn Groove", "Satire", "Slow Jam", "Club",
    "Tango", "Samba", "Folklore", "Ballad", "Power Ballad", "Rhythmic Soul",
    "Freestyle", "Duet", "Punk Rock", "Drum Solo", "A capella", "Euro-House",
    "Dance Hall", "Goa", "Drum & Bass", "Club-House", "Hardcore Techno",
    "Terror", "Indie", "BritPop", "Negerpunk", "Polsk Punk", "Beat",
    "Christian Gangsta Rap", "Heavy Metal", "Black Metal", "Crossover",
    "Contemporary Christian", "Christian Rock", "Merengue", "Salsa",
    "Thrash Metal", "Anime", "Jpop", "Synthpop", "Abstract", "Art Rock",
    "Baroque", "Bhangra", "Big Beat", "Breakbeat", "Chillout", "Downtempo",
    "Dub", "EBM", "Eclectic", "Electro", "Electroclash", "Emo", "Experimental",
    "Garage", "Global", "IDM", "Illbient", "Industro-Goth", "Jam Band",
    "Krautrock", "Leftfield", "Lounge", "Math Rock", "New Romantic",
    "Nu-Breakz", "Post-Punk", "Post-Rock", "Psytrance", "Shoegaze",
    "Space Rock", "Trop Rock", "World Music", "Neoclassical", "Audiobook",
    "Audio Theatre", "Neue Deutsche Welle", "Podcast", "Indie Rock",
    "G-Funk", "Dubstep", "Garage Rock", "Psybient",
];

/// Genre code written to the ID3v1 trailer when the genre is unknown.
pub const UNKNOWN_GENRE: u8 = 255;

/// Resolve a genre value to its ID3v1 code.
///
/// Accepts `"17"`, `"(17)"`, `"(17)Rock"` and plain names (case-insensitive).
pub fn genre_code(text: &str) -> u8 {
    let trimmed = text.trim();
    let numeric = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.split_once(')'))
        .map(|(inner, _)| inner)
        .unwrap_or(trimmed);

    if let Ok(n) = numeric.parse::<usize>() {
        return if n < GENRES.len() { n as u8 } else { UNKNOWN_GENRE };
    }

    GENRES
        .iter()
        .position(|g| g.eq_ignore_ascii_case(trimmed))
        .map(|i| i as u8)
        .unwrap_or(UNKNOWN_GENRE)
}

/// Genre name for an ID3v1 code.
pub fn genre_name(code: u8) -> Option<&'static str> {
    GENRES.get(code as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_ids_round_trip_through_bytes() {
        for id in FrameId::ALL {
            assert_eq!(FrameId::from_bytes(id.as_bytes()), Some(id));
        }
        assert_eq!("TALB".parse::<FrameId>().unwrap(), FrameId::Album);
        for id in FrameId::ALL {
            assert_eq!(id.as_str().as_bytes(), id.as_bytes());
            assert_eq!(id.to_string(), id.as_str());
        }
        assert!("APIC".parse::<FrameId>().is_err());
    }

    #[test]
    fn latin1_replaces_wide_chars() {
        assert_eq!(encode_text("Café ♪", Encoding::Latin1), b"Caf\xE9 ?");
        assert_eq!(decode_text(b"Caf\xE9", Encoding::Latin1), "Café");
    }

    #[test]
    fn utf16_with_bom() {
        let bytes = encode_text("Hé", Encoding::Utf16);
        assert_eq!(bytes, [0xFF, 0xFE, b'H', 0, 0xE9, 0]);
        assert_eq!(decode_text(&bytes, Encoding::Utf16), "Hé");
    }

    #[test]
    fn utf16_big_endian() {
        let bytes = encode_text("ok", Encoding::Utf16Be);
        assert_eq!(bytes, [0, b'o', 0, b'k']);
        assert_eq!(decode_text(&bytes, Encoding::Utf16Be), "ok");
    }

    #[test]
    fn terminators_trimmed() {
        assert_eq!(trim_terminator(b"abc\0\0", Encoding::Latin1), b"abc");
        assert_eq!(trim_terminator(&[b'a', 0, 0, 0], Encoding::Utf16Be), &[b'a', 0][..]);
    }

    #[test]
    fn genre_lookup() {
        assert_eq!(genre_code("17"), 17);
        assert_eq!(genre_code("(17)"), 17);
        assert_eq!(genre_code("(9)Metal"), 9);
        assert_eq!(genre_code("rock"), 17);
        assert_eq!(genre_code("Hyperpop"), UNKNOWN_GENRE);
        assert_eq!(genre_code("999"), UNKNOWN_GENRE);
        assert_eq!(genre_name(17), Some("Rock"));
        assert_eq!(genre_name(UNKNOWN_GENRE), None);
    }
}
