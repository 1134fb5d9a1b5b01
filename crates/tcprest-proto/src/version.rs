//! Frame-level version tagging.
//!
//! A TCPREST frame is either the historical bracketed shape
//! (`Class/method(tok,tok,...)`, no leading tag at all) or the pipe-separated
//! shape tagged with a single version digit (`0|...` or `1|...`). Both tags
//! use the identical pipe-separated layout: if the first character is `0`
//! or `1` followed by `|`, take the v2 path; otherwise take the legacy
//! `Class/method(...)` path.

use std::fmt;
use std::fmt::Write as _;

/// The version digit carried by a pipe-framed request or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// `0|...`
    V0,
    /// `1|...`
    V1,
}

impl Version {
    /// The byte this version is tagged with on the wire.
    pub fn tag(self) -> char {
        match self {
            Version::V0 => '0',
            Version::V1 => '1',
        }
    }

    /// Parse a version tag character.
    pub fn from_tag(c: char) -> Option<Version> {
        match c {
            '0' => Some(Version::V0),
            '1' => Some(Version::V1),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.tag())
    }
}

/// Which of the two frame shapes a line of input uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameForm {
    /// The historical `Class/methodName(tok1,tok2,...)` shape.
    BracketLegacy,
    /// The pipe-separated shape, tagged with [`Version`].
    Pipe(Version),
}

/// Inspect the first two characters of `line` to decide which frame shape it
/// uses.
///
/// Does not validate anything past the tag: a result of
/// `FrameForm::Pipe(_)` does not guarantee the rest of the frame parses.
pub fn sniff(line: &str) -> FrameForm {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(c), Some('|')) if Version::from_tag(c).is_some() => {
            FrameForm::Pipe(Version::from_tag(c).expect("checked above"))
        }
        _ => FrameForm::BracketLegacy,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sniffs_pipe_frames() {
        assert_eq!(sniff("0|abc|def"), FrameForm::Pipe(Version::V0));
        assert_eq!(sniff("1|abc|def"), FrameForm::Pipe(Version::V1));
    }

    #[test]
    fn sniffs_bracket_legacy() {
        assert_eq!(
            sniff("com.example.Hello/helloWorld()"),
            FrameForm::BracketLegacy
        );
        // A lone digit with no pipe isn't a version tag.
        assert_eq!(sniff("2|nope"), FrameForm::BracketLegacy);
        assert_eq!(sniff(""), FrameForm::BracketLegacy);
    }
}
