//! Sequential RIFF chunk walking.
//!
//! A RIFF container is a 12-byte preamble (`RIFF`, total size, form type)
//! followed by chunks of 4-byte tag + little-endian u32 size + payload.
//! Odd-sized payloads are padded to a word boundary.

use std::fmt;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{WavError, WavResult};

/// Chunk kinds this parser understands, plus a fallback for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkTag {
    /// `fmt ` - sample format description.
    Fmt,
    /// `data` - sample payload.
    Data,
    /// `cue ` - cue point table.
    Cue,
    /// `bext` - broadcast extension metadata.
    Bext,
    /// Any chunk id without a decoder; skipped by declared size.
    Unknown([u8; 4]),
}

impl ChunkTag {
    /// Maps a raw 4-byte chunk id onto a tag.
    pub fn from_bytes(id: [u8; 4]) -> Self {
        match &id {
            b"fmt " => ChunkTag::Fmt,
            b"data" => ChunkTag::Data,
            b"cue " => ChunkTag::Cue,
            b"bext" => ChunkTag::Bext,
            _ => ChunkTag::Unknown(id),
        }
    }

    /// The raw 4-byte chunk id.
    pub fn as_bytes(&self) -> [u8; 4] {
        match self {
            ChunkTag::Fmt => *b"fmt ",
            ChunkTag::Data => *b"data",
            ChunkTag::Cue => *b"cue ",
            ChunkTag::Bext => *b"bext",
            ChunkTag::Unknown(id) => *id,
        }
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.as_bytes()))
    }
}

/// Header of a single chunk as it appears in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Decoded chunk tag.
    pub tag: ChunkTag,
    /// Declared payload size in bytes, excluding padding.
    pub size: u32,
}

/// Walks the chunks of a RIFF/WAVE stream in file order.
///
/// The reader stays positioned between chunks; after [`next_chunk`]
/// returns a header, the caller must consume the payload with exactly one
/// of [`read_payload`], [`skip_payload`] or [`payload_position`] +
/// [`skip_payload`] before asking for the next chunk.
///
/// [`next_chunk`]: ChunkReader::next_chunk
/// [`read_payload`]: ChunkReader::read_payload
/// [`skip_payload`]: ChunkReader::skip_payload
/// [`payload_position`]: ChunkReader::payload_position
#[derive(Debug)]
pub struct ChunkReader<R> {
    inner: R,
}

impl<R: Read + Seek> ChunkReader<R> {
    /// Validates the RIFF/WAVE preamble and positions the reader at the
    /// first chunk header.
    pub fn new(mut inner: R) -> WavResult<Self> {
        let mut tag = [0u8; 4];
        inner.read_exact(&mut tag)?;
        if &tag != b"RIFF" {
            return Err(WavError::NotRiff(tag));
        }

        // Declared total size; the walk relies on per-chunk sizes instead.
        let _total_size = inner.read_u32::<LittleEndian>()?;

        let mut form = [0u8; 4];
        inner.read_exact(&mut form)?;
        if &form != b"WAVE" {
            return Err(WavError::NotWave(form));
        }

        Ok(Self { inner })
    }

    /// Reads the next chunk header, or `None` at a clean end of stream.
    ///
    /// End of stream exactly at a chunk-header boundary terminates the walk
    /// normally; a partial header is an I/O error.
    pub fn next_chunk(&mut self) -> WavResult<Option<ChunkHeader>> {
        let mut id = [0u8; 4];
        if !self.read_exact_or_eof(&mut id)? {
            return Ok(None);
        }
        let size = self.inner.read_u32::<LittleEndian>()?;

        Ok(Some(ChunkHeader {
            tag: ChunkTag::from_bytes(id),
            size,
        }))
    }

    /// Absolute stream offset of the current chunk's first payload byte.
    pub fn payload_position(&mut self) -> WavResult<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Reads the whole payload of the current chunk.
    pub fn read_payload(&mut self, header: &ChunkHeader) -> WavResult<Vec<u8>> {
        let mut payload = vec![0u8; header.size as usize];
        self.inner.read_exact(&mut payload)?;
        self.skip_padding(header.size)?;
        Ok(payload)
    }

    /// Seeks past the payload of the current chunk without reading it.
    pub fn skip_payload(&mut self, header: &ChunkHeader) -> WavResult<()> {
        self.inner.seek(SeekFrom::Current(i64::from(header.size)))?;
        self.skip_padding(header.size)
    }

    // Odd-sized chunks carry one pad byte to the next word boundary.
    fn skip_padding(&mut self, size: u32) -> WavResult<()> {
        if size % 2 == 1 {
            self.inner.seek(SeekFrom::Current(1))?;
        }
        Ok(())
    }

    // Fills `buf`, reporting a clean EOF only when zero bytes were read.
    fn read_exact_or_eof(&mut self, buf: &mut [u8]) -> WavResult<bool> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(false),
                Ok(0) => {
                    return Err(WavError::Io(std::io::Error::new(
                        ErrorKind::UnexpectedEof,
                        "stream ended inside a chunk header",
                    )))
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn preamble() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes
    }

    #[test]
    fn test_tag_round_trip() {
        for id in [*b"fmt ", *b"data", *b"cue ", *b"bext", *b"LIST"] {
            assert_eq!(ChunkTag::from_bytes(id).as_bytes(), id);
        }
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(ChunkTag::Fmt.to_string(), "fmt ");
        assert_eq!(ChunkTag::Unknown(*b"LIST").to_string(), "LIST");
    }

    #[test]
    fn test_rejects_non_riff_stream() {
        let bytes = b"MThd\x00\x00\x00\x06WAVE".to_vec();
        match ChunkReader::new(Cursor::new(bytes)) {
            Err(WavError::NotRiff(tag)) => assert_eq!(&tag, b"MThd"),
            other => panic!("expected NotRiff, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_wave_form() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(b"AVI ");
        match ChunkReader::new(Cursor::new(bytes)) {
            Err(WavError::NotWave(form)) => assert_eq!(&form, b"AVI "),
            other => panic!("expected NotWave, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_chunk_list_terminates() {
        let mut reader = ChunkReader::new(Cursor::new(preamble())).unwrap();
        assert_eq!(reader.next_chunk().unwrap(), None);
    }

    #[test]
    fn test_walks_chunks_in_order() {
        let mut bytes = preamble();
        bytes.extend_from_slice(b"junk");
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&[0xaa, 0xbb]);
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&0u32.to_le_bytes());

        let mut reader = ChunkReader::new(Cursor::new(bytes)).unwrap();

        let first = reader.next_chunk().unwrap().unwrap();
        assert_eq!(first.tag, ChunkTag::Unknown(*b"junk"));
        assert_eq!(first.size, 2);
        assert_eq!(reader.read_payload(&first).unwrap(), vec![0xaa, 0xbb]);

        let second = reader.next_chunk().unwrap().unwrap();
        assert_eq!(second.tag, ChunkTag::Data);
        assert_eq!(second.size, 0);
        reader.skip_payload(&second).unwrap();

        assert_eq!(reader.next_chunk().unwrap(), None);
    }

    #[test]
    fn test_odd_sized_chunk_is_word_aligned() {
        let mut bytes = preamble();
        bytes.extend_from_slice(b"junk");
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&[1, 2, 3, 0]); // payload + pad byte
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&0u32.to_le_bytes());

        let mut reader = ChunkReader::new(Cursor::new(bytes)).unwrap();
        let junk = reader.next_chunk().unwrap().unwrap();
        reader.skip_payload(&junk).unwrap();

        let next = reader.next_chunk().unwrap().unwrap();
        assert_eq!(next.tag, ChunkTag::Data);
    }

    #[test]
    fn test_partial_chunk_header_is_an_error() {
        let mut bytes = preamble();
        bytes.extend_from_slice(b"da"); // torn header
        let mut reader = ChunkReader::new(Cursor::new(bytes)).unwrap();
        assert!(matches!(reader.next_chunk(), Err(WavError::Io(_))));
    }
}
