//! RIFF/WAVE header parsing for field recorder files.
//!
//! Walks the chunk list of a WAV file and decodes the metadata a recorder
//! catalog needs: the PCM format (`fmt `), the location and size of the
//! sample payload (`data`), embedded cue markers (`cue `), and the
//! broadcast-extension origination timestamp (`bext`). Sample data itself
//! is never read, and only PCM files are accepted.
//!
//! # Example
//!
//! ```no_run
//! use cuescan_wav::WavHeader;
//!
//! let header = WavHeader::read_from("ZOOM0001_Tr12-0001.WAV").unwrap();
//!
//! println!(
//!     "{} Hz, {:.1} s, {} cue points",
//!     header.format.sample_rate,
//!     header.length_seconds().unwrap(),
//!     header.cue_points.len(),
//! );
//! ```

pub mod chunk;
pub mod error;
pub mod header;

pub use chunk::{ChunkHeader, ChunkReader, ChunkTag};
pub use error::{WavError, WavResult};
pub use header::{AudioFormat, CuePoint, DataChunkInfo, Encoding, TimedCuePoint, WavHeader};
