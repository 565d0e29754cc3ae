//! Session reconstruction for field recorder WAV files.
//!
//! A recorder that hits its file-size limit keeps recording into the next
//! sequence number, so one take ends up split over several files. This
//! crate decides which parsed headers continue each other and folds a
//! sorted directory listing into recording groups, each with a combined
//! cue-point timeline.
//!
//! # Example
//!
//! ```no_run
//! use cuescan_session::{group_headers, ContinuationMatcher};
//! use cuescan_wav::WavHeader;
//!
//! let headers = vec![
//!     WavHeader::read_from("ZOOM0001_Tr12-0001.WAV").unwrap(),
//!     WavHeader::read_from("ZOOM0001_Tr12-0002.WAV").unwrap(),
//! ];
//!
//! let groups = group_headers(&ContinuationMatcher::default(), headers).unwrap();
//! for group in &groups {
//!     println!("{}: {} file(s)", group.title(), group.members().len());
//! }
//! ```

pub mod error;
pub mod grouping;
pub mod matcher;
pub mod naming;

pub use error::{SessionError, SessionResult};
pub use grouping::{group_headers, GroupCue, RecordingGroup};
pub use matcher::{ContinuationMatcher, DEFAULT_MAX_GAP_SECONDS};
pub use naming::{RecorderFileName, Track};
