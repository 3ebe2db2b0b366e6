//! Compiled (pre-parsed) language assets
//!
//! A compiled asset skips text parsing at load time. Layout:
//!
//! | offset | size | content                      |
//! |--------|------|------------------------------|
//! | 0      | 4    | magic `RVTC`                 |
//! | 4      | 1    | format version               |
//! | 5      | 1    | [`AssetKind`] code           |
//! | 6      | ..   | zlib-compressed JSON table   |
//!
//! The loader trusts the stored table; nothing is re-validated.

use std::io::{Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::assets::AssetKind;
use crate::error::{Error, Result};
use crate::formats::{DatabaseTable, DialogueTable};

/// "RVTC" magic signature
pub const COMPILED_MAGIC: [u8; 4] = *b"RVTC";

/// Current compiled asset version.
pub const COMPILED_VERSION: u8 = 1;

const HEADER_SIZE: usize = 6;

/// A table that can be stored as a compiled asset.
pub trait CompiledTable: Serialize + DeserializeOwned {
    const KIND: AssetKind;
}

impl CompiledTable for DialogueTable {
    const KIND: AssetKind = AssetKind::Dialogues;
}

impl CompiledTable for DatabaseTable {
    const KIND: AssetKind = AssetKind::DatabaseText;
}

/// Serialize a table into compiled asset bytes.
///
/// # Errors
///
/// Returns an error if serialization or compression fails.
pub fn encode<T: CompiledTable>(table: &T) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(table)?;

    let mut out = Vec::with_capacity(HEADER_SIZE + json.len() / 4);
    out.extend_from_slice(&COMPILED_MAGIC);
    out.push(COMPILED_VERSION);
    out.push(T::KIND.code());

    let mut encoder = ZlibEncoder::new(out, Compression::default());
    encoder.write_all(&json)?;
    Ok(encoder.finish()?)
}

/// Deserialize compiled asset bytes, checking that they hold a `T`.
///
/// # Errors
///
/// Returns [`Error::InvalidCompiledMagic`], [`Error::UnsupportedCompiledVersion`]
/// or [`Error::AssetKindMismatch`] for a bad header, and IO/JSON errors for a
/// corrupt payload.
pub fn decode<T: CompiledTable>(bytes: &[u8]) -> Result<T> {
    let kind = check_header(bytes)?;
    if kind != T::KIND.code() {
        return Err(Error::AssetKindMismatch {
            expected: T::KIND.prefix(),
            found: kind_name(kind),
        });
    }

    let mut json = Vec::new();
    ZlibDecoder::new(&bytes[HEADER_SIZE..]).read_to_end(&mut json)?;
    Ok(serde_json::from_slice(&json)?)
}

/// The asset kind stored in a compiled asset's header.
///
/// # Errors
///
/// Returns the header errors of [`decode`], or [`Error::AssetKindMismatch`]
/// for a kind code this version does not know.
pub fn peek_kind(bytes: &[u8]) -> Result<AssetKind> {
    let kind = check_header(bytes)?;
    AssetKind::from_code(kind).ok_or_else(|| Error::AssetKindMismatch {
        expected: "a known asset kind",
        found: kind_name(kind),
    })
}

/// Validate magic and version, returning the kind code.
fn check_header(bytes: &[u8]) -> Result<u8> {
    if bytes.len() < HEADER_SIZE || bytes[..4] != COMPILED_MAGIC {
        let mut magic = [0u8; 4];
        let len = bytes.len().min(4);
        magic[..len].copy_from_slice(&bytes[..len]);
        return Err(Error::InvalidCompiledMagic(magic));
    }

    let version = bytes[4];
    if version != COMPILED_VERSION {
        return Err(Error::UnsupportedCompiledVersion { version });
    }

    Ok(bytes[5])
}

fn kind_name(code: u8) -> String {
    AssetKind::from_code(code).map_or_else(|| format!("unknown kind {code}"), |k| k.prefix().to_string())
}

/// Read a compiled asset from disk.
///
/// # Errors
///
/// Returns [`Error::AssetNotFound`] if the file does not exist, or any error
/// from [`decode`].
pub fn read_compiled<T: CompiledTable, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::AssetNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    decode(&bytes)
}

/// Write a compiled asset to disk, creating parent directories.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_compiled<T: CompiledTable, P: AsRef<Path>>(path: P, table: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, encode(table)?)?;
    tracing::debug!("Wrote compiled {} to {}", T::KIND, path.display());
    Ok(())
}
