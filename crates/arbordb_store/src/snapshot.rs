//! Snapshot file format.
//!
//! Layout:
//!
//! ```text
//! [0..4)   magic bytes "ARBN"
//! [4..6)   format version, little-endian u16
//! [6..]    CBOR encoding of the record table
//! ```
//!
//! The magic and version are validated before any CBOR decoding happens, so
//! a foreign file in the store directory fails fast with a clear error.

use crate::error::{StoreError, StoreResult};
use crate::record::NodeRecord;
use serde::{Deserialize, Serialize};

/// Magic bytes identifying an ArborDB node snapshot.
const MAGIC: &[u8; 4] = b"ARBN";

/// Current snapshot format version.
const FORMAT_VERSION: u16 = 1;

/// Length of the fixed header (magic + version).
const HEADER_LEN: usize = 6;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotBody {
    nodes: Vec<NodeRecord>,
}

/// Encodes the full record table into snapshot bytes.
pub(crate) fn encode(records: Vec<NodeRecord>) -> StoreResult<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN + records.len() * 64);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());

    let body = SnapshotBody { nodes: records };
    ciborium::ser::into_writer(&body, &mut out)
        .map_err(|e| StoreError::Codec(format!("snapshot encode failed: {e}")))?;

    Ok(out)
}

/// Decodes snapshot bytes back into records.
pub(crate) fn decode(data: &[u8]) -> StoreResult<Vec<NodeRecord>> {
    if data.len() < HEADER_LEN {
        return Err(StoreError::corrupted(format!(
            "snapshot too short: {} bytes",
            data.len()
        )));
    }
    if &data[..4] != MAGIC {
        return Err(StoreError::corrupted("bad snapshot magic"));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version != FORMAT_VERSION {
        return Err(StoreError::corrupted(format!(
            "unsupported snapshot version: {version} (expected {FORMAT_VERSION})"
        )));
    }

    let body: SnapshotBody = ciborium::de::from_reader(&data[HEADER_LEN..])
        .map_err(|e| StoreError::Codec(format!("snapshot decode failed: {e}")))?;

    Ok(body.nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{NodeId, NodeRecord};
    use crate::types::NodeKey;
    use chrono::Utc;

    fn record(key: i64, parent: Option<NodeId>) -> NodeRecord {
        NodeRecord {
            key: NodeKey::new(key),
            id: NodeId::new(),
            parent,
            label: format!("node {key}"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn round_trip() {
        let root = record(50, None);
        let child = record(30, Some(root.id));
        let records = vec![root, child];

        let bytes = encode(records.clone()).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn empty_table_round_trip() {
        let bytes = encode(Vec::new()).unwrap();
        assert_eq!(decode(&bytes).unwrap(), Vec::new());
    }

    #[test]
    fn bad_magic_rejected() {
        let mut bytes = encode(vec![record(50, None)]).unwrap();
        bytes[0] = b'X';

        let result = decode(&bytes);
        assert!(matches!(result, Err(StoreError::Corrupted(_))));
    }

    #[test]
    fn truncated_header_rejected() {
        let result = decode(b"ARB");
        assert!(matches!(result, Err(StoreError::Corrupted(_))));
    }

    #[test]
    fn future_version_rejected() {
        let mut bytes = encode(Vec::new()).unwrap();
        bytes[4] = 0xFF;
        bytes[5] = 0xFF;

        let result = decode(&bytes);
        assert!(matches!(result, Err(StoreError::Corrupted(_))));
    }

    #[test]
    fn garbage_body_rejected() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"ARBN");
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        let result = decode(&bytes);
        assert!(matches!(result, Err(StoreError::Codec(_))));
    }
}
