//! AOG file format serialization and deserialization.
//!
//! The AOG (AND/OR Graph) format stores a compiled decision graph, plus an
//! optional default start symbol, as a binary file with a header, a JSON
//! payload and a SHA-256 integrity hash.
//!
//! Layout:
//!   [magic: 4 bytes "AOG\0"] [version_major: 1] [version_minor: 1]
//!   [flags: 1] [reserved: 1] [vertex_count: u32 LE] [terminal_count: u32 LE]
//!   [payload_length: u32 LE] [json_payload: N bytes] [sha256: 32 bytes]

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::SnapshotError;
use crate::graph::DecisionGraph;

/// Magic bytes for AOG format: "AOG\0"
const AOG_MAGIC: [u8; 4] = [0x41, 0x4F, 0x47, 0x00];

/// Current version.
const VERSION_MAJOR: u8 = 0;
const VERSION_MINOR: u8 = 1;

/// Header size (magic + version + flags + reserved + counts + payload_len).
const HEADER_SIZE: usize = 4 + 1 + 1 + 1 + 1 + 4 + 4 + 4; // 20 bytes

/// SHA-256 hash size.
const HASH_SIZE: usize = 32;

/// An AOG file: a graph and the symbol sessions start from by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AogFile {
    pub graph: DecisionGraph,
    #[serde(default)]
    pub start: Option<String>,
}

impl AogFile {
    /// Create a new AOG file from a graph.
    pub fn new(graph: DecisionGraph, start: Option<String>) -> Self {
        Self { graph, start }
    }

    /// Whether `data` starts with the AOG magic bytes.
    pub fn is_aog(data: &[u8]) -> bool {
        data.starts_with(&AOG_MAGIC)
    }

    /// Serialize to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let json =
            serde_json::to_vec(self).map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        let vertex_count = self.graph.vertex_count() as u32;
        let terminal_count = self.graph.terminal_count() as u32;
        let payload_len = json.len() as u32;

        let mut buf = Vec::with_capacity(HEADER_SIZE + json.len() + HASH_SIZE);

        buf.extend_from_slice(&AOG_MAGIC);
        buf.push(VERSION_MAJOR);
        buf.push(VERSION_MINOR);
        // Flags and reserved byte
        buf.push(0);
        buf.push(0);
        buf.extend_from_slice(&vertex_count.to_le_bytes());
        buf.extend_from_slice(&terminal_count.to_le_bytes());
        buf.extend_from_slice(&payload_len.to_le_bytes());
        buf.extend_from_slice(&json);

        let hash = Sha256::digest(&buf);
        buf.extend_from_slice(&hash);

        Ok(buf)
    }

    /// Deserialize from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        if data.len() < HEADER_SIZE + HASH_SIZE {
            return Err(SnapshotError::TooShort {
                expected: HEADER_SIZE + HASH_SIZE,
                actual: data.len(),
            });
        }

        if !Self::is_aog(data) {
            return Err(SnapshotError::InvalidMagic);
        }

        let major = data[4];
        let minor = data[5];
        if major != VERSION_MAJOR {
            return Err(SnapshotError::UnsupportedVersion { major, minor });
        }

        let vertex_count = read_u32(data, 8) as usize;
        let terminal_count = read_u32(data, 12) as usize;
        let payload_len = read_u32(data, 16) as usize;

        let payload_end = HEADER_SIZE + payload_len;
        if data.len() < payload_end + HASH_SIZE {
            return Err(SnapshotError::TooShort {
                expected: payload_end + HASH_SIZE,
                actual: data.len(),
            });
        }

        let stored_hash = &data[payload_end..payload_end + HASH_SIZE];
        let computed_hash = Sha256::digest(&data[..payload_end]);
        if computed_hash.as_slice() != stored_hash {
            return Err(SnapshotError::IntegrityFailed {
                expected: hex_encode(stored_hash),
                actual: hex_encode(computed_hash.as_slice()),
            });
        }

        let file: AogFile = serde_json::from_slice(&data[HEADER_SIZE..payload_end])
            .map_err(|e| SnapshotError::Deserialization(e.to_string()))?;

        if file.graph.vertex_count() != vertex_count {
            return Err(SnapshotError::Deserialization(format!(
                "vertex count mismatch: header says {vertex_count}, payload has {}",
                file.graph.vertex_count()
            )));
        }
        if file.graph.terminal_count() != terminal_count {
            return Err(SnapshotError::Deserialization(format!(
                "terminal count mismatch: header says {terminal_count}, payload has {}",
                file.graph.terminal_count()
            )));
        }

        Ok(file)
    }
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
