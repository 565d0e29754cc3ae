//! Decoded WAV header model.
//!
//! [`WavHeader`] is built in a single pass over the file's chunks and is
//! read-only afterwards. Only header metadata is decoded; the sample
//! payload of the `data` chunk is never loaded.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};
use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::chunk::{ChunkHeader, ChunkReader, ChunkTag};
use crate::error::{WavError, WavResult};

/// Format tag value for uncompressed PCM.
const PCM_FORMAT_TAG: u16 = 1;

/// Size of the PCM `fmt ` chunk body.
const FMT_BODY_LEN: usize = 16;

/// Size of one record in the `cue ` chunk.
const CUE_RECORD_LEN: usize = 24;

/// Byte range of OriginationDate within a `bext` payload.
///
/// Zoom recorders store the date as 10 ASCII bytes at offset 320, with the
/// 8-byte OriginationTime directly after it.
const BEXT_DATE_START: usize = 320;
const BEXT_TIME_START: usize = 330;
const BEXT_TIME_END: usize = 338;

/// Sample encoding declared by the `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Uncompressed PCM (format tag 1).
    Pcm,
    /// Any other format tag; files with this encoding are rejected.
    Other(u16),
}

impl Encoding {
    /// Classifies a raw format tag.
    pub fn from_tag(tag: u16) -> Self {
        if tag == PCM_FORMAT_TAG {
            Encoding::Pcm
        } else {
            Encoding::Other(tag)
        }
    }
}

/// Decoded `fmt ` chunk fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    /// Sample encoding; always [`Encoding::Pcm`] in a parsed header.
    pub encoding: Encoding,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Sample frames per second.
    pub sample_rate: u32,
    /// Average bytes per second of sample data.
    pub avg_bytes_per_second: u32,
    /// Bytes per sample frame across all channels.
    pub block_align: u16,
    /// Bits per sample per channel.
    pub bits_per_sample: u16,
}

/// Location of the `data` chunk payload within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChunkInfo {
    /// Absolute file offset of the first sample byte.
    pub byte_offset: u64,
    /// Declared payload size in bytes.
    pub byte_size: u32,
}

/// A single marker from the `cue ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuePoint {
    /// Cue id as stored in the file.
    pub id: u32,
    /// Offset in sample frames from the start of the sample data.
    pub sample_offset: u32,
}

/// A cue point with its frame offset converted to seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedCuePoint {
    /// Cue id as stored in the file.
    pub id: u32,
    /// Offset in sample frames.
    pub sample_offset: u32,
    /// Offset in seconds from the start of the sample data.
    pub seconds: f64,
}

/// Parsed header metadata of one WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct WavHeader {
    /// Path the header was read from.
    pub path: PathBuf,
    /// Decoded `fmt ` chunk.
    pub format: AudioFormat,
    /// Location of the sample payload.
    pub data: DataChunkInfo,
    /// Cue points in chunk order. Each header owns its own list.
    pub cue_points: Vec<CuePoint>,
    /// Recording start from the `bext` chunk, when present and parseable.
    pub start_datetime: Option<NaiveDateTime>,
}

impl WavHeader {
    /// Opens `path` and parses its header chunks.
    ///
    /// The file handle is scoped to this call and released on success and
    /// failure alike.
    pub fn read_from(path: impl AsRef<Path>) -> WavResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::parse(path, BufReader::new(file))
    }

    /// Parses a WAV header from any seekable byte stream.
    ///
    /// `path` is recorded verbatim; continuation matching later relies on
    /// it, not on the stream.
    pub fn parse<R: Read + Seek>(path: impl Into<PathBuf>, stream: R) -> WavResult<Self> {
        let path = path.into();
        debug!(path = %path.display(), "parsing WAV header");

        let mut chunks = ChunkReader::new(stream)?;
        let mut format: Option<AudioFormat> = None;
        let mut data: Option<DataChunkInfo> = None;
        let mut cue_points: Vec<CuePoint> = Vec::new();
        let mut start_datetime: Option<NaiveDateTime> = None;

        while let Some(header) = chunks.next_chunk()? {
            debug!(tag = %header.tag, size = header.size, "chunk");
            match header.tag {
                ChunkTag::Fmt => {
                    if format.is_some() {
                        return Err(WavError::DuplicateFmtChunk);
                    }
                    format = Some(decode_fmt(&mut chunks, &header)?);
                }
                ChunkTag::Data => {
                    let byte_offset = chunks.payload_position()?;
                    chunks.skip_payload(&header)?;
                    // A repeated data chunk overwrites the earlier record.
                    data = Some(DataChunkInfo {
                        byte_offset,
                        byte_size: header.size,
                    });
                }
                ChunkTag::Cue => {
                    cue_points.extend(decode_cue(&mut chunks, &header)?);
                }
                ChunkTag::Bext => {
                    start_datetime = decode_bext(&mut chunks, &header)?;
                }
                ChunkTag::Unknown(_) => {
                    chunks.skip_payload(&header)?;
                }
            }
        }

        let format = format.ok_or(WavError::MissingFmtChunk)?;
        let data = data.ok_or(WavError::MissingDataChunk)?;

        Ok(WavHeader {
            path,
            format,
            data,
            cue_points,
            start_datetime,
        })
    }

    /// File name component of the path, when it is valid UTF-8.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// Number of sample frames in the data chunk (real division).
    pub fn sample_count(&self) -> WavResult<f64> {
        if self.format.block_align == 0 {
            return Err(WavError::DegenerateFormat {
                field: "block_align",
            });
        }
        Ok(f64::from(self.data.byte_size) / f64::from(self.format.block_align))
    }

    /// Duration of the sample payload in seconds (real division).
    pub fn length_seconds(&self) -> WavResult<f64> {
        if self.format.avg_bytes_per_second == 0 {
            return Err(WavError::DegenerateFormat {
                field: "avg_bytes_per_second",
            });
        }
        Ok(f64::from(self.data.byte_size) / f64::from(self.format.avg_bytes_per_second))
    }

    /// Cue points in chunk order, each with its offset in seconds.
    pub fn cue_points_with_seconds(&self) -> WavResult<Vec<TimedCuePoint>> {
        if self.format.sample_rate == 0 {
            return Err(WavError::DegenerateFormat {
                field: "sample_rate",
            });
        }
        let rate = f64::from(self.format.sample_rate);
        Ok(self
            .cue_points
            .iter()
            .map(|cue| TimedCuePoint {
                id: cue.id,
                sample_offset: cue.sample_offset,
                seconds: f64::from(cue.sample_offset) / rate,
            })
            .collect())
    }

    /// Wall-clock end of the recording: start plus payload duration.
    ///
    /// `None` when the file carried no usable `bext` start time.
    pub fn end_time(&self) -> WavResult<Option<NaiveDateTime>> {
        let Some(start) = self.start_datetime else {
            return Ok(None);
        };
        let length = self.length_seconds()?;
        let micros = (length * 1_000_000.0).round() as i64;
        Ok(Some(start + Duration::microseconds(micros)))
    }
}

fn decode_fmt<R: Read + Seek>(
    chunks: &mut ChunkReader<R>,
    header: &ChunkHeader,
) -> WavResult<AudioFormat> {
    if (header.size as usize) < FMT_BODY_LEN {
        return Err(WavError::TruncatedChunk {
            tag: ChunkTag::Fmt,
            expected: FMT_BODY_LEN,
            found: header.size as usize,
        });
    }

    // Extension fields past the 16-byte PCM body are not interpreted.
    let payload = chunks.read_payload(header)?;
    let mut body = Cursor::new(&payload);

    let format_tag = body.read_u16::<LittleEndian>()?;
    let channels = body.read_u16::<LittleEndian>()?;
    let sample_rate = body.read_u32::<LittleEndian>()?;
    let avg_bytes_per_second = body.read_u32::<LittleEndian>()?;
    let block_align = body.read_u16::<LittleEndian>()?;
    let bits_per_sample = body.read_u16::<LittleEndian>()?;

    let encoding = Encoding::from_tag(format_tag);
    if let Encoding::Other(tag) = encoding {
        return Err(WavError::UnsupportedCodec { format_tag: tag });
    }

    let format = AudioFormat {
        encoding,
        channels,
        sample_rate,
        avg_bytes_per_second,
        block_align,
        bits_per_sample,
    };
    debug!(
        channels = format.channels,
        sample_rate = format.sample_rate,
        bits = format.bits_per_sample,
        "decoded fmt chunk"
    );
    Ok(format)
}

fn decode_cue<R: Read + Seek>(
    chunks: &mut ChunkReader<R>,
    header: &ChunkHeader,
) -> WavResult<Vec<CuePoint>> {
    let payload = chunks.read_payload(header)?;
    if payload.len() < 4 {
        return Err(WavError::TruncatedChunk {
            tag: ChunkTag::Cue,
            expected: 4,
            found: payload.len(),
        });
    }

    let mut body = Cursor::new(&payload);
    let count = body.read_u32::<LittleEndian>()? as usize;

    let needed = 4 + count * CUE_RECORD_LEN;
    if payload.len() < needed {
        return Err(WavError::TruncatedChunk {
            tag: ChunkTag::Cue,
            expected: needed,
            found: payload.len(),
        });
    }

    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let id = body.read_u32::<LittleEndian>()?;
        let _position = body.read_u32::<LittleEndian>()?;
        let _chunk_id = body.read_u32::<LittleEndian>()?;
        let _chunk_start = body.read_u32::<LittleEndian>()?;
        let _block_start = body.read_u32::<LittleEndian>()?;
        let sample_offset = body.read_u32::<LittleEndian>()?;
        points.push(CuePoint { id, sample_offset });
    }
    debug!(count = points.len(), "decoded cue chunk");
    Ok(points)
}

fn decode_bext<R: Read + Seek>(
    chunks: &mut ChunkReader<R>,
    header: &ChunkHeader,
) -> WavResult<Option<NaiveDateTime>> {
    let payload = chunks.read_payload(header)?;
    let start = origination_datetime(&payload);
    debug!(start = ?start, "decoded bext chunk");
    Ok(start)
}

// A bext payload too short for the fixed date/time ranges, or one holding
// anything unparseable there, yields no start time rather than an error.
fn origination_datetime(payload: &[u8]) -> Option<NaiveDateTime> {
    let date = payload.get(BEXT_DATE_START..BEXT_TIME_START)?;
    let time = payload.get(BEXT_TIME_START..BEXT_TIME_END)?;
    let date = std::str::from_utf8(date).ok()?;
    let time = std::str::from_utf8(time).ok()?;
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").ok()
}
