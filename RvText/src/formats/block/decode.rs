//! Text asset decoding
//!
//! Text assets are UTF-8 or a legacy 8-bit code page. A byte-order mark on
//! the first line would otherwise hide the first block header, so it is
//! consumed here before any line splitting happens.

use std::path::Path;

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::{Error, Result};

/// Decode raw text asset bytes.
///
/// A UTF-8 or UTF-16 byte-order mark selects that encoding and is removed.
/// Without one, valid UTF-8 is used as-is and anything else is read as
/// Windows-1252.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            tracing::warn!("Malformed {} sequences replaced while decoding", encoding.name());
        }
        return text.into_owned();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::debug!("Text asset is not UTF-8, decoding as {}", WINDOWS_1252.name());
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

/// Read and decode a text asset from disk.
///
/// # Errors
///
/// Returns [`Error::AssetNotFound`] if the file does not exist, or
/// [`Error::Io`] if it cannot be read.
pub fn read_text_asset<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::AssetNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;
    Ok(decode_text(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_bom_is_removed() {
        let bytes = b"\xEF\xBB\xBF<<Intro>>\nHi\n";
        assert_eq!(decode_text(bytes), "<<Intro>>\nHi\n");
    }

    #[test]
    fn test_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<<A>>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&bytes), "<<A>>");
    }

    #[test]
    fn test_latin_fallback() {
        // "Weiße" in Windows-1252
        let bytes = b"Wei\xDFe";
        assert_eq!(decode_text(bytes), "Weiße");
    }

    #[test]
    fn test_missing_file_is_asset_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text_asset(dir.path().join("Dialogues.rvtext")).unwrap_err();
        assert!(matches!(err, Error::AssetNotFound { .. }));
    }
}
