//! Recorder file naming convention.
//!
//! Zoom H-series recorders name their output
//! `ZOOM<session>_Tr<track>-<sequence>.WAV`, where `session` and
//! `sequence` are four digits and `track` is either `12` (inputs 1+2) or
//! `LR` (the built-in stereo pair). Files renamed during import may carry
//! an additional `PANOK-` prefix. The match is case-sensitive and applies
//! to the file name only, never the directory path.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{SessionError, SessionResult};

/// Regex pattern for recorder-generated file names.
const RECORDER_NAME_PATTERN: &str = r"^(?:PANOK-)?ZOOM(\d{4})_Tr(12|LR)-(\d{4})\.WAV$";

static RECORDER_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn recorder_name_regex() -> &'static Regex {
    RECORDER_NAME_REGEX
        .get_or_init(|| Regex::new(RECORDER_NAME_PATTERN).expect("invalid regex pattern"))
}

/// Which input pair a file was recorded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    /// External inputs 1 and 2 (`Tr12`).
    Inputs12,
    /// The built-in stereo microphone pair (`TrLR`).
    LeftRight,
}

/// Components of a recorder-generated file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderFileName {
    /// Four-digit session number.
    pub session: u16,
    /// Input pair the file belongs to.
    pub track: Track,
    /// Four-digit position of the file within its session.
    pub sequence: u32,
}

impl RecorderFileName {
    /// Parses the file-name component of `path` against the recorder
    /// pattern.
    pub fn parse(path: &Path) -> SessionResult<Self> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let caps = recorder_name_regex()
            .captures(name)
            .ok_or_else(|| SessionError::naming(name))?;

        // The pattern pins every group to digits or `12`/`LR`, so these
        // conversions cannot fail on a captured name.
        let session: u16 = caps[1].parse().map_err(|_| SessionError::naming(name))?;
        let track = if &caps[2] == "12" {
            Track::Inputs12
        } else {
            Track::LeftRight
        };
        let sequence: u32 = caps[3].parse().map_err(|_| SessionError::naming(name))?;

        Ok(RecorderFileName {
            session,
            track,
            sequence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_plain_recorder_name() {
        let name = RecorderFileName::parse(Path::new("ZOOM0001_Tr12-0002.WAV")).unwrap();
        assert_eq!(
            name,
            RecorderFileName {
                session: 1,
                track: Track::Inputs12,
                sequence: 2,
            }
        );
    }

    #[test]
    fn test_parses_prefixed_lr_name() {
        let name =
            RecorderFileName::parse(Path::new("PANOK-ZOOM0042_TrLR-0010.WAV")).unwrap();
        assert_eq!(name.session, 42);
        assert_eq!(name.track, Track::LeftRight);
        assert_eq!(name.sequence, 10);
    }

    #[test]
    fn test_directory_is_excluded_from_the_match() {
        let name =
            RecorderFileName::parse(Path::new("/sd/FOLDER01/ZOOM0001_TrLR-0001.WAV")).unwrap();
        assert_eq!(name.session, 1);
    }

    #[test]
    fn test_rejects_off_pattern_names() {
        for bad in [
            "ZOOM001_Tr12-0001.WAV",    // three-digit session
            "ZOOM0001_Tr34-0001.WAV",   // unknown track pair
            "ZOOM0001_Tr12-001.WAV",    // three-digit sequence
            "zoom0001_Tr12-0001.WAV",   // lowercase recorder prefix
            "ZOOM0001_Tr12-0001.wav",   // lowercase extension
            "ZOOM0001_Tr12-0001.WAV.bak",
            "IMG_0001.JPG",
            "",
        ] {
            let result = RecorderFileName::parse(Path::new(bad));
            assert!(
                matches!(result, Err(SessionError::NamingConvention { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
