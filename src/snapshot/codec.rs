//! Versioned binary schema for the aggregation store
//!
//! Layout, all integers and floats little-endian:
//!
//! ```text
//! magic    b"BRCS"
//! version  u16
//! entries  u64
//! entry*   key_len u32 | key bytes | min f64 | max f64 | sum f64 | count u64
//! ```
//!
//! Floats are stored bit-for-bit, so a load reproduces every entry exactly.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

use crate::aggregate::{KeyStats, Store};

pub const MAGIC: &[u8; 4] = b"BRCS";
pub const FORMAT_VERSION: u16 = 1;

const HEADER_LEN: usize = 4 + 2 + 8;
const STATS_LEN: usize = 8 * 4;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("not a snapshot file (bad magic)")]
    BadMagic,

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u16),

    #[error("snapshot is truncated")]
    Truncated,

    #[error("snapshot repeats key {0:?}")]
    DuplicateKey(String),

    #[error("{0} unexpected bytes after the last entry")]
    TrailingBytes(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode every entry of the store
pub fn save(store: &Store) -> Bytes {
    let body: usize = store
        .iter()
        .map(|(key, _)| 4 + key.len() + STATS_LEN)
        .sum();
    let mut buf = BytesMut::with_capacity(HEADER_LEN + body);

    buf.put_slice(MAGIC);
    buf.put_u16_le(FORMAT_VERSION);
    buf.put_u64_le(store.len() as u64);

    for (key, stats) in store.iter() {
        buf.put_u32_le(key.len() as u32);
        buf.put_slice(key);
        buf.put_f64_le(stats.min);
        buf.put_f64_le(stats.max);
        buf.put_f64_le(stats.sum);
        buf.put_u64_le(stats.count);
    }

    buf.freeze()
}

/// Decode a blob produced by [`save`] into a fresh store
pub fn load(blob: &[u8]) -> Result<Store, SnapshotError> {
    let mut buf = blob;

    ensure(buf, HEADER_LEN)?;
    if &buf[..MAGIC.len()] != MAGIC {
        return Err(SnapshotError::BadMagic);
    }
    buf.advance(MAGIC.len());

    let version = buf.get_u16_le();
    if version != FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(version));
    }

    let entries = buf.get_u64_le();
    // Cap the up-front reservation; a corrupt count must not allocate wildly
    let mut store = Store::with_capacity(entries.min(1 << 16) as usize);

    for _ in 0..entries {
        ensure(buf, 4)?;
        let key_len = buf.get_u32_le() as usize;

        ensure(buf, key_len + STATS_LEN)?;
        let (key, rest) = buf.split_at(key_len);
        buf = rest;

        let stats = KeyStats {
            min: buf.get_f64_le(),
            max: buf.get_f64_le(),
            sum: buf.get_f64_le(),
            count: buf.get_u64_le(),
        };

        if store.insert(key, stats).is_some() {
            return Err(SnapshotError::DuplicateKey(
                String::from_utf8_lossy(key).into_owned(),
            ));
        }
    }

    if buf.has_remaining() {
        return Err(SnapshotError::TrailingBytes(buf.remaining()));
    }

    Ok(store)
}

fn ensure(buf: &[u8], needed: usize) -> Result<(), SnapshotError> {
    if buf.remaining() < needed {
        Err(SnapshotError::Truncated)
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod codec_tests;
