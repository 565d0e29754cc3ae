//! Decides whether one recorder file directly continues another.
//!
//! When a recording hits the recorder's file-size limit the recorder
//! closes the file and immediately opens the next sequence number. Two
//! headers are a continuation pair when the names say so and the second
//! file starts within a small tolerance of where the first one ended.

use cuescan_wav::WavHeader;
use tracing::debug;

use crate::error::SessionResult;
use crate::naming::RecorderFileName;

/// Default wall-clock gap tolerance between two files of one recording.
pub const DEFAULT_MAX_GAP_SECONDS: f64 = 2.0;

/// Applies the continuation rules to pairs of parsed headers.
#[derive(Debug, Clone, Copy)]
pub struct ContinuationMatcher {
    max_gap_seconds: f64,
}

impl Default for ContinuationMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_GAP_SECONDS)
    }
}

impl ContinuationMatcher {
    /// Creates a matcher with the given gap tolerance in seconds.
    pub fn new(max_gap_seconds: f64) -> Self {
        Self { max_gap_seconds }
    }

    /// Returns `true` when `current` is the direct continuation of
    /// `previous`.
    ///
    /// The rules short-circuit to `false` in order: no previous file,
    /// different directories, different session numbers, different track
    /// pairs, non-consecutive sequence numbers, or a start/end gap above
    /// the tolerance (an overlap counts as within tolerance). A file name
    /// outside the recorder convention is the one fatal path and raises
    /// [`SessionError::NamingConvention`].
    ///
    /// When either file lacks a usable `bext` timestamp the elapsed-time
    /// rule cannot be evaluated and the pair is not a continuation.
    ///
    /// [`SessionError::NamingConvention`]: crate::SessionError::NamingConvention
    pub fn is_continuation_of(
        &self,
        previous: Option<&WavHeader>,
        current: &WavHeader,
    ) -> SessionResult<bool> {
        let Some(previous) = previous else {
            return Ok(false);
        };

        // Split recordings never span directories.
        if previous.path.parent() != current.path.parent() {
            debug!(
                previous = %previous.path.display(),
                current = %current.path.display(),
                "different directories",
            );
            return Ok(false);
        }

        let previous_name = RecorderFileName::parse(&previous.path)?;
        let current_name = RecorderFileName::parse(&current.path)?;

        if previous_name.session != current_name.session {
            debug!(
                previous = previous_name.session,
                current = current_name.session,
                "different sessions",
            );
            return Ok(false);
        }

        if previous_name.track != current_name.track {
            debug!("different track pairs");
            return Ok(false);
        }

        if current_name.sequence != previous_name.sequence + 1 {
            debug!(
                previous = previous_name.sequence,
                current = current_name.sequence,
                "sequence numbers not consecutive",
            );
            return Ok(false);
        }

        let previous_end = previous.end_time()?;
        let (Some(previous_end), Some(current_start)) = (previous_end, current.start_datetime)
        else {
            debug!("missing bext timestamp, cannot verify the elapsed time");
            return Ok(false);
        };

        let gap = current_start.signed_duration_since(previous_end);
        let gap_seconds = gap.num_milliseconds() as f64 / 1000.0;
        let continues = gap_seconds <= self.max_gap_seconds;
        debug!(gap_seconds, continues, "elapsed-time check");
        Ok(continues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use chrono::{NaiveDate, NaiveDateTime};
    use cuescan_wav::{AudioFormat, CuePoint, DataChunkInfo, Encoding};
    use std::path::Path;

    fn timestamp(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    /// A stereo 16-bit 44.1 kHz header with a given payload duration.
    fn header(path: &str, start: Option<NaiveDateTime>, seconds: u32) -> WavHeader {
        WavHeader {
            path: Path::new(path).to_path_buf(),
            format: AudioFormat {
                encoding: Encoding::Pcm,
                channels: 2,
                sample_rate: 44_100,
                avg_bytes_per_second: 176_400,
                block_align: 4,
                bits_per_sample: 16,
            },
            data: DataChunkInfo {
                byte_offset: 44,
                byte_size: seconds * 176_400,
            },
            cue_points: vec![CuePoint {
                id: 1,
                sample_offset: 22_050,
            }],
            start_datetime: start,
        }
    }

    #[test]
    fn test_no_previous_file_is_not_a_continuation() {
        let matcher = ContinuationMatcher::default();
        let current = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        assert!(!matcher.is_continuation_of(None, &current).unwrap());
    }

    #[test]
    fn test_small_gap_is_a_continuation() {
        let matcher = ContinuationMatcher::default();
        // ends 10:01:00, next starts 10:01:01
        let previous = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        let current = header("/sd/ZOOM0001_Tr12-0002.WAV", Some(timestamp(10, 1, 1)), 60);
        assert!(matcher
            .is_continuation_of(Some(&previous), &current)
            .unwrap());
    }

    #[test]
    fn test_overlapping_start_is_a_continuation() {
        let matcher = ContinuationMatcher::default();
        // next file starts before the previous one ends
        let previous = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        let current = header("/sd/ZOOM0001_Tr12-0002.WAV", Some(timestamp(10, 0, 30)), 60);
        assert!(matcher
            .is_continuation_of(Some(&previous), &current)
            .unwrap());
    }

    #[test]
    fn test_ten_second_gap_is_not_a_continuation() {
        let matcher = ContinuationMatcher::default();
        let previous = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        let current = header("/sd/ZOOM0001_Tr12-0002.WAV", Some(timestamp(10, 1, 10)), 60);
        assert!(!matcher
            .is_continuation_of(Some(&previous), &current)
            .unwrap());
    }

    #[test]
    fn test_gap_tolerance_is_injectable() {
        let matcher = ContinuationMatcher::new(15.0);
        let previous = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        let current = header("/sd/ZOOM0001_Tr12-0002.WAV", Some(timestamp(10, 1, 10)), 60);
        assert!(matcher
            .is_continuation_of(Some(&previous), &current)
            .unwrap());
    }

    #[test]
    fn test_different_sessions_never_continue() {
        let matcher = ContinuationMatcher::default();
        let previous = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        let current = header("/sd/ZOOM0002_Tr12-0002.WAV", Some(timestamp(10, 1, 0)), 60);
        assert!(!matcher
            .is_continuation_of(Some(&previous), &current)
            .unwrap());
    }

    #[test]
    fn test_different_tracks_never_continue() {
        let matcher = ContinuationMatcher::default();
        let previous = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        let current = header("/sd/ZOOM0001_TrLR-0002.WAV", Some(timestamp(10, 1, 0)), 60);
        assert!(!matcher
            .is_continuation_of(Some(&previous), &current)
            .unwrap());
    }

    #[test]
    fn test_non_consecutive_sequence_numbers() {
        let matcher = ContinuationMatcher::default();
        let previous = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        let current = header("/sd/ZOOM0001_Tr12-0003.WAV", Some(timestamp(10, 1, 0)), 60);
        assert!(!matcher
            .is_continuation_of(Some(&previous), &current)
            .unwrap());
    }

    #[test]
    fn test_different_directories_never_continue() {
        let matcher = ContinuationMatcher::default();
        let previous = header("/sd/a/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        let current = header("/sd/b/ZOOM0001_Tr12-0002.WAV", Some(timestamp(10, 1, 0)), 60);
        assert!(!matcher
            .is_continuation_of(Some(&previous), &current)
            .unwrap());
    }

    #[test]
    fn test_off_pattern_name_raises() {
        let matcher = ContinuationMatcher::default();
        let previous = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        let current = header("/sd/take-two.wav", Some(timestamp(10, 1, 0)), 60);
        let result = matcher.is_continuation_of(Some(&previous), &current);
        assert!(matches!(
            result,
            Err(SessionError::NamingConvention { .. })
        ));
    }

    #[test]
    fn test_missing_timestamps_cannot_continue() {
        let matcher = ContinuationMatcher::default();
        let with_time = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        let without_time = header("/sd/ZOOM0001_Tr12-0002.WAV", None, 60);

        assert!(!matcher
            .is_continuation_of(Some(&with_time), &without_time)
            .unwrap());

        let previous_untimed = header("/sd/ZOOM0001_Tr12-0001.WAV", None, 60);
        let current_timed = header("/sd/ZOOM0001_Tr12-0002.WAV", Some(timestamp(10, 1, 0)), 60);
        assert!(!matcher
            .is_continuation_of(Some(&previous_untimed), &current_timed)
            .unwrap());
    }

    #[test]
    fn test_degenerate_previous_header_propagates() {
        let matcher = ContinuationMatcher::default();
        let mut previous = header("/sd/ZOOM0001_Tr12-0001.WAV", Some(timestamp(10, 0, 0)), 60);
        previous.format.avg_bytes_per_second = 0;
        previous.data.byte_size = 0;
        let current = header("/sd/ZOOM0001_Tr12-0002.WAV", Some(timestamp(10, 1, 0)), 60);
        let result = matcher.is_continuation_of(Some(&previous), &current);
        assert!(matches!(result, Err(SessionError::Wav(_))));
    }
}
