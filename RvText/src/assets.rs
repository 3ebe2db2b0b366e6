//! Asset kinds and file naming
//!
//! Text assets are named `<Prefix><Language>.<ext>`, e.g.
//! `DialoguesEnglish.rvtext`. In single-language mode the language part is
//! empty (`Dialogues.rvtext`). Compiled assets use the same stem with the
//! `rvdata2` extension.

use std::fmt;
use std::path::Path;

use crate::error::Result;

/// Extension of compiled assets.
pub const COMPILED_EXTENSION: &str = "rvdata2";

/// Default extension of text assets.
pub const DEFAULT_TEXT_EXTENSION: &str = "rvtext";

/// The two kinds of language asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Dialogues,
    DatabaseText,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [Self::Dialogues, Self::DatabaseText];

    /// File name prefix.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Dialogues => "Dialogues",
            Self::DatabaseText => "DatabaseText",
        }
    }

    /// Kind byte in a compiled asset header.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Dialogues => 1,
            Self::DatabaseText => 2,
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// `Dialogues<language>.<ext>`; `language` is `None` in single-language mode.
#[must_use]
pub fn text_file_name(kind: AssetKind, language: Option<&str>, extension: &str) -> String {
    format!("{}{}.{extension}", kind.prefix(), language.unwrap_or_default())
}

/// `Dialogues<language>.rvdata2`.
#[must_use]
pub fn compiled_file_name(kind: AssetKind, language: Option<&str>) -> String {
    text_file_name(kind, language, COMPILED_EXTENSION)
}

/// Languages that have a dialogue text asset in `dir`, sorted by name.
///
/// The unsuffixed single-language file is not reported.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn discover_languages<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<String>> {
    let prefix = AssetKind::Dialogues.prefix();
    let suffix = format!(".{extension}");

    let mut languages = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let language = name
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix.as_str()));
        match language {
            Some(language) if !language.is_empty() => languages.push(language.to_string()),
            _ => {}
        }
    }

    languages.sort();
    Ok(languages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_names() {
        assert_eq!(
            text_file_name(AssetKind::Dialogues, Some("English"), "rvtext"),
            "DialoguesEnglish.rvtext"
        );
        assert_eq!(
            text_file_name(AssetKind::DatabaseText, None, "txt"),
            "DatabaseText.txt"
        );
        assert_eq!(
            compiled_file_name(AssetKind::DatabaseText, Some("German")),
            "DatabaseTextGerman.rvdata2"
        );
    }

    #[test]
    fn test_kind_codes() {
        for kind in AssetKind::ALL {
            assert_eq!(AssetKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(AssetKind::from_code(0), None);
    }

    #[test]
    fn test_discover_languages() {
        let dir = TempDir::new().unwrap();
        for name in [
            "DialoguesGerman.rvtext",
            "DialoguesEnglish.rvtext",
            "Dialogues.rvtext",
            "DatabaseTextFrench.rvtext",
            "DialoguesSpanish.txt",
        ] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("DialoguesDir.rvtext")).unwrap();

        let languages = discover_languages(dir.path(), "rvtext").unwrap();
        assert_eq!(languages, ["English", "German"]);
    }
}
