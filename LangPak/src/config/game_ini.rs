//! Persisted language selection
//!
//! The selected language lives in the host's `Game.ini` as a single
//! `Language=<name>` line. Every other line of the file is left untouched,
//! byte for byte: the host writes the rest of the file in its own code page.

use std::path::{Path, PathBuf};

use regex::bytes::Regex;
use rvtext::formats::decode_text;

use crate::error::Result;

lazy_static::lazy_static! {
    static ref LANGUAGE_ENTRY: Regex =
        Regex::new(r"^Language=(.+)$").expect("valid Game.ini entry pattern");
}

/// Host-owned storage of the selected language.
pub trait LanguageSelection {
    /// The persisted language, or `None` if no entry exists.
    fn load(&self) -> Result<Option<String>>;

    /// Persist a language, replacing any previous entry.
    fn save(&mut self, language: &str) -> Result<()>;
}

/// `Language=` entry in a `Game.ini` file.
#[derive(Debug, Clone)]
pub struct GameIni {
    path: PathBuf,
}

impl GameIni {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `Game.ini` in a game root.
    pub fn in_dir<P: AsRef<Path>>(root: P) -> Self {
        Self::new(root.as_ref().join("Game.ini"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<u8>> {
        match std::fs::read(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl LanguageSelection for GameIni {
    fn load(&self) -> Result<Option<String>> {
        Ok(find_entry(&self.read()?).map(decode_text))
    }

    fn save(&mut self, language: &str) -> Result<()> {
        let content = replace_entry(&self.read()?, language);
        std::fs::write(&self.path, content)?;
        tracing::debug!("Saved Language={language} to {}", self.path.display());
        Ok(())
    }
}

/// Body of a line without its `\n` or `\r\n` terminator.
fn line_body(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// First `Language=` value in the file content.
fn find_entry(content: &[u8]) -> Option<&[u8]> {
    content.split(|&b| b == b'\n').find_map(|line| {
        LANGUAGE_ENTRY
            .captures(line_body(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_bytes())
    })
}

/// Replace the first `Language=` line, keeping its line terminator, or
/// append a new one.
fn replace_entry(content: &[u8], language: &str) -> Vec<u8> {
    let entry = format!("Language={language}");
    let mut out = Vec::with_capacity(content.len() + entry.len() + 1);
    let mut replaced = false;

    for line in content.split_inclusive(|&b| b == b'\n') {
        let body = line_body(line);
        if !replaced && LANGUAGE_ENTRY.is_match(body) {
            out.extend_from_slice(entry.as_bytes());
            out.extend_from_slice(&line[body.len()..]);
            replaced = true;
        } else {
            out.extend_from_slice(line);
        }
    }

    if !replaced {
        if !out.is_empty() && !out.ends_with(b"\n") {
            out.push(b'\n');
        }
        out.extend_from_slice(entry.as_bytes());
        out.push(b'\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_entry_wins() {
        let content = b"[Game]\r\nTitle=Quest\r\nLanguage=German\r\nLanguage=French\r\n";
        assert_eq!(find_entry(content), Some(&b"German"[..]));
        assert_eq!(find_entry(b"[Game]\nLanguage=\n"), None);
    }

    #[test]
    fn test_replace_in_place() {
        let content = b"[Game]\r\nLanguage=German\r\nTitle=Quest\r\n";
        assert_eq!(
            replace_entry(content, "English"),
            b"[Game]\r\nLanguage=English\r\nTitle=Quest\r\n"
        );
    }

    #[test]
    fn test_append_when_absent() {
        assert_eq!(
            replace_entry(b"[Game]\nTitle=Quest", "English"),
            b"[Game]\nTitle=Quest\nLanguage=English\n"
        );
        assert_eq!(replace_entry(b"", "English"), b"Language=English\n");
    }

    #[test]
    fn test_ansi_title_is_kept_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let mut ini = GameIni::in_dir(dir.path());
        std::fs::write(ini.path(), b"[Game]\r\nTitle=Caf\xE9 Quest\r\nLanguage=German\r\n").unwrap();

        assert_eq!(ini.load().unwrap().as_deref(), Some("German"));
        ini.save("English").unwrap();
        assert_eq!(
            std::fs::read(ini.path()).unwrap(),
            b"[Game]\r\nTitle=Caf\xE9 Quest\r\nLanguage=English\r\n"
        );
        assert_eq!(ini.load().unwrap().as_deref(), Some("English"));
    }

    #[test]
    fn test_game_ini_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut ini = GameIni::in_dir(dir.path());
        assert_eq!(ini.load().unwrap(), None);

        ini.save("English").unwrap();
        ini.save("German").unwrap();
        assert_eq!(ini.load().unwrap().as_deref(), Some("German"));
        assert_eq!(std::fs::read_to_string(ini.path()).unwrap(), "Language=German\n");
    }
}
