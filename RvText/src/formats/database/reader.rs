//! Database text parsing

use std::path::Path;

use super::{BaselineDatabase, DatabasePath, DatabaseTable};
use crate::error::Result;
use crate::formats::block::{self, RawLine, TextBuffer};

/// Read and parse a database text asset from disk.
///
/// # Errors
///
/// Returns [`Error::AssetNotFound`](crate::Error::AssetNotFound) if the file
/// does not exist, or any error from [`parse_database`].
pub fn read_database<P: AsRef<Path>>(
    path: P,
    baseline: &dyn BaselineDatabase,
) -> Result<DatabaseTable> {
    let path = path.as_ref();
    let source = block::read_text_asset(path)?;
    let table = parse_database(&source, baseline)?;
    tracing::debug!("Read {} database overrides from {}", table.len(), path.display());
    Ok(table)
}

/// Parse database text into a table of overrides.
///
/// Every header closes the block above it and opens a new one; the text of
/// a block, right-trimmed, is stored under the block's path. Text before the
/// first header is ignored. When a path appears twice the later block wins.
///
/// # Errors
///
/// The first header that fails to resolve, or a class learning override
/// the baseline cannot back, aborts the build with an error carrying that
/// header's line number.
pub fn parse_database(source: &str, baseline: &dyn BaselineDatabase) -> Result<DatabaseTable> {
    let mut table = DatabaseTable::new();
    let mut open: Option<(DatabasePath, usize)> = None;
    let mut buffer = TextBuffer::default();

    for token in block::lines(source) {
        match token.line {
            RawLine::BlockHeader(content) => {
                let path = DatabasePath::parse(content).map_err(|e| e.at_line(token.number))?;
                let text = buffer.take();
                if let Some((previous, line)) = open.replace((path, token.number)) {
                    table.place(previous, text, baseline, line)?;
                }
            }
            RawLine::TextLine(line) => buffer.push_line(line),
        }
    }

    if let Some((path, line)) = open {
        table.place(path, buffer.take(), baseline, line)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::formats::database::{IndexedSet, ItemGroup, Learning, NoBaseline};

    struct Classes;

    impl BaselineDatabase for Classes {
        fn class_learnings(&self, class_id: u32) -> Option<Vec<Learning>> {
            (class_id == 1).then(|| {
                vec![
                    Learning {
                        level: 1,
                        skill_id: 3,
                        note: "Heal".to_string(),
                    },
                    Learning {
                        level: 5,
                        skill_id: 4,
                        note: "Fire".to_string(),
                    },
                ]
            })
        }
    }

    #[test]
    fn test_item_fields() {
        let table = parse_database(
            "<<actors:3:name>>\nBob\n\n<<states:11:message4>>\n is no longer confused.\n",
            &NoBaseline,
        )
        .unwrap();
        assert_eq!(table.item_field(ItemGroup::Actors, 3, "name"), Some("Bob"));
        assert_eq!(
            table.item_field(ItemGroup::States, 11, "message4"),
            Some(" is no longer confused.")
        );
    }

    #[test]
    fn test_multi_line_value() {
        let table = parse_database(
            "<<weapons:2:description>>\nA sharp blade.\nForged in fire.\n\n\n",
            &NoBaseline,
        )
        .unwrap();
        assert_eq!(
            table.item_field(ItemGroup::Weapons, 2, "description"),
            Some("A sharp blade.\nForged in fire.")
        );
    }

    #[test]
    fn test_last_entry_without_trailing_newline() {
        let table = parse_database("<<types:elements:3>>\nIce", &NoBaseline).unwrap();
        assert_eq!(table.indexed(IndexedSet::Elements, 3), Some("Ice"));
    }

    #[test]
    fn test_empty_block_stores_empty_string() {
        let table = parse_database("<<system:currency_unit>>\n<<names:hero>>\nAlex\n", &NoBaseline).unwrap();
        assert_eq!(table.system("currency_unit"), Some(""));
        assert_eq!(table.name("hero"), Some("Alex"));
    }

    #[test]
    fn test_text_before_first_header_is_ignored() {
        let table = parse_database("preamble\n<<maps:1:display_name>>\nCastle\n", &NoBaseline).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.map_field(1, "display_name"), Some("Castle"));
    }

    #[test]
    fn test_module_constants() {
        let table = parse_database("<<Vocab:ShopBuy>>\nPurchase\n<<Vocab:ShopSell>>\nSell\n", &NoBaseline).unwrap();
        let constants: Vec<_> = table.constants().collect();
        assert_eq!(
            constants,
            [("Vocab", "ShopBuy", "Purchase"), ("Vocab", "ShopSell", "Sell")]
        );
    }

    #[test]
    fn test_duplicate_path_later_wins() {
        let table = parse_database("<<actors:1:name>>\nA\n<<actors:1:name>>\nB\n", &NoBaseline).unwrap();
        assert_eq!(table.item_field(ItemGroup::Actors, 1, "name"), Some("B"));
    }

    #[test]
    fn test_class_learning_overrides_note() {
        let table = parse_database("<<classes:1:learnings:1>>\nInferno\n", &Classes).unwrap();
        let list = table.class_learnings(1).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].note, "Heal");
        assert_eq!(list[1].note, "Inferno");
        assert_eq!(list[1].level, 5);
    }

    #[test]
    fn test_errors_carry_header_line() {
        let err = parse_database("<<actors:1:name>>\nA\n\n<<frobnicate:1:name>>\nB\n", &NoBaseline).unwrap_err();
        assert!(matches!(err, Error::UnknownGroup { ref group, line: 4 } if group == "frobnicate"));

        let err = parse_database("<<types:monsters:1>>\nSlime\n", &NoBaseline).unwrap_err();
        assert!(matches!(err, Error::UnknownVariable { line: 1, .. }));

        let err = parse_database("<<system>>\n", &NoBaseline).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { line: 1, .. }));
    }

    #[test]
    fn test_learning_errors_carry_header_line() {
        let err = parse_database("<<actors:1:name>>\nA\n<<classes:1:learnings:9>>\nX\n", &Classes).unwrap_err();
        assert!(matches!(err, Error::LearningSlotOutOfRange { class_id: 1, slot: 9, line: 3 }));

        let err = parse_database("<<classes:7:learnings:0>>\nX\n", &Classes).unwrap_err();
        assert!(matches!(err, Error::MissingClassBaseline { class_id: 7, line: 1 }));
    }

    #[test]
    fn test_crlf_input() {
        let table = parse_database("<<actors:1:nickname>>\r\nThe Brave\r\n\r\n", &NoBaseline).unwrap();
        assert_eq!(table.item_field(ItemGroup::Actors, 1, "nickname"), Some("The Brave"));
    }
}
