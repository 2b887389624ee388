//! Append-only observation store — binary protobuf log.
//!
//! Storage format: length-prefixed protobuf frames.
//!   [4-byte LE length][protobuf bytes][4-byte LE length][protobuf bytes]...
//!
//! Rules:
//!   - Strict append only — no mutation, no deletion, no reordering
//!   - fsync after every write
//!   - Sequence strictly increasing from 1 (validated on append)
//!   - A frame cut short anywhere, prefix included, is corrupt

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use prost::Message;
use thiserror::Error;
use tracing::debug;

use crate::proto_types::ProtoObservation;

/// Largest frame accepted on read.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sequence violation in observation store: expected {expected}, got {found}")]
    SequenceViolation { expected: u64, found: u64 },

    #[error("invalid frame length {len} at offset {offset}")]
    FrameLength { len: usize, offset: u64 },

    #[error("truncated frame at offset {offset}")]
    Truncated { offset: u64 },

    #[error("protobuf decode error at offset {offset}: {source}")]
    Decode {
        offset: u64,
        #[source]
        source: prost::DecodeError,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl StoreError {
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            StoreError::SequenceViolation { .. } => io::ErrorKind::InvalidInput,
            StoreError::FrameLength { .. }
            | StoreError::Truncated { .. }
            | StoreError::Decode { .. } => io::ErrorKind::InvalidData,
            StoreError::Io(e) => e.kind(),
        }
    }
}

/// Append-only observation log backed by a binary file.
pub struct ObservationStore {
    path: PathBuf,
    last_sequence: u64,
}

impl ObservationStore {
    /// Open or create an observation log at the given path.
    /// Reads existing frames to determine the last sequence number.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let last_sequence = if path.exists() {
            let frames = Self::read_all_from_file(path)?;
            frames.last().map(|o| o.sequence).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            path: path.to_path_buf(),
            last_sequence,
        })
    }

    /// Append a single observation, fsyncing before returning.
    pub fn append(&mut self, observation: &ProtoObservation) -> Result<(), StoreError> {
        let expected = self.last_sequence + 1;
        if observation.sequence != expected {
            return Err(StoreError::SequenceViolation {
                expected,
                found: observation.sequence,
            });
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let buf = observation.encode_to_vec();
        let len = buf.len() as u32;

        {
            let mut writer = BufWriter::new(&mut file);
            writer.write_all(&len.to_le_bytes())?;
            writer.write_all(&buf)?;
            writer.flush()?;
        }
        file.sync_all()?;

        debug!(sequence = observation.sequence, bytes = buf.len(), "appended observation");
        self.last_sequence = observation.sequence;
        Ok(())
    }

    /// Load all observations in sequence order.
    pub fn load_all(&self) -> Result<Vec<ProtoObservation>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        Self::read_all_from_file(&self.path)
    }

    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all_from_file(path: &Path) -> Result<Vec<ProtoObservation>, StoreError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut observations = Vec::new();
        let mut offset = 0u64;
        let mut len_buf = [0u8; 4];

        loop {
            match read_prefix(&mut reader, &mut len_buf)? {
                0 => break,
                4 => {}
                _ => return Err(StoreError::Truncated { offset }),
            }

            let len = u32::from_le_bytes(len_buf) as usize;
            if len == 0 || len > MAX_FRAME_LEN {
                return Err(StoreError::FrameLength { len, offset });
            }

            let mut frame = vec![0u8; len];
            reader.read_exact(&mut frame).map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => StoreError::Truncated { offset },
                _ => StoreError::Io(e),
            })?;

            let observation = ProtoObservation::decode(frame.as_slice())
                .map_err(|source| StoreError::Decode { offset, source })?;
            observations.push(observation);
            offset += 4 + len as u64;
        }

        Ok(observations)
    }
}

/// Fill `buf` as far as the reader allows; returns the bytes read.
fn read_prefix<R: Read>(reader: &mut R, buf: &mut [u8; 4]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
