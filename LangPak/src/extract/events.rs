//! Event text extraction
//!
//! Each text-bearing command of a page is written to the dialogue or
//! database asset and replaced by a reference to the new entry:
//!
//! | command              | asset                   | replaced by                      |
//! |----------------------|-------------------------|----------------------------------|
//! | Show Text + lines    | dialogue entry          | script `show_dialogue("<id>")`   |
//! | Show Scrolling Text  | dialogue entry          | script `show_scrolling("<id>")`  |
//! | Show Choices         | one entry per choice    | choices become `\dialogue[<id>]` |
//! | Change Name/Nickname | `names:<key>` entry     | name becomes `\name[<key>]`      |
//!
//! Commands that already reference entries are kept as they are.

use std::io::{self, Write};

use serde_json::Value;

use rvtext::formats::dialogue::{Background, NO_FAST_TAG, Position};
use rvtext::formats::{DatabasePath, DatabaseWriter, DialogueWriter};

use super::ExtractSummary;
use super::content::{EventCommand, GameContent, codes};
use crate::messages::{DIALOGUE_CODE, NAME_CODE, dialogue_code, name_code};

/// Text id prefix of common events.
pub const COMMON_EVENT_PREFIX: &str = "Common Events/";

/// Characters of a map or event name kept in text ids.
const NAME_WIDTH: usize = 9;

/// Scroll speed the engine uses when none is given.
const DEFAULT_SCROLL_SPEED: i64 = 2;

/// Text id prefix of a map's events: `001:Castle To/`.
#[must_use]
pub fn map_prefix(map_id: u32, map_name: &str) -> String {
    format!("{map_id:03}:{}/", truncate(map_name, NAME_WIDTH))
}

/// `<prefix><event %03d>:<name %.9s>/Page <page %02d>/<seq %03d>`
#[must_use]
pub fn text_id(prefix: &str, event_id: u32, event_name: &str, page: usize, seq: usize) -> String {
    format!(
        "{prefix}{event_id:03}:{}/Page {page:02}/{seq:03}",
        truncate(event_name, NAME_WIDTH)
    )
}

/// Alias key of a name: lower case, spaces as underscores.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}

fn truncate(name: &str, chars: usize) -> &str {
    match name.char_indices().nth(chars) {
        Some((end, _)) => &name[..end],
        None => name,
    }
}

/// Where a page sits, for building its text ids.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageLocation<'a> {
    pub prefix: &'a str,
    pub event_id: u32,
    pub event_name: &'a str,
    /// 1-based
    pub page: usize,
}

impl PageLocation<'_> {
    fn text_id(&self, seq: usize) -> String {
        text_id(self.prefix, self.event_id, self.event_name, self.page, seq)
    }
}

/// Extract all maps and common events, converting their pages in place.
pub(crate) fn extract_events<D: Write, B: Write>(
    content: &mut GameContent,
    dialogues: &mut DialogueWriter<D>,
    database: &mut DatabaseWriter<B>,
    summary: &mut ExtractSummary,
) -> io::Result<()> {
    for map in &mut content.maps {
        if !map.display_name.is_empty() {
            let path = DatabasePath::MapField {
                map_id: map.id,
                field: "display_name".to_string(),
            };
            database.write_entry(&path, &map.display_name)?;
            summary.database_entries += 1;
        }
        if !map.note.is_empty() {
            let path = DatabasePath::MapField {
                map_id: map.id,
                field: "note".to_string(),
            };
            database.write_entry(&path, &map.note)?;
            summary.database_entries += 1;
        }

        let prefix = map_prefix(map.id, &map.name);
        for event in &mut map.events {
            for (index, page) in event.pages.iter_mut().enumerate() {
                let location = PageLocation {
                    prefix: &prefix,
                    event_id: event.id,
                    event_name: &event.name,
                    page: index + 1,
                };
                let list = std::mem::take(&mut page.list);
                page.list = extract_page(list, location, dialogues, database, summary)?;
            }
        }
        summary.maps += 1;
    }

    for common in &mut content.common_events {
        let location = PageLocation {
            prefix: COMMON_EVENT_PREFIX,
            event_id: common.id,
            event_name: &common.name,
            page: 1,
        };
        let list = std::mem::take(&mut common.list);
        common.list = extract_page(list, location, dialogues, database, summary)?;
        summary.common_events += 1;
    }

    Ok(())
}

/// Convert one command list, writing its text to the assets.
pub(crate) fn extract_page<D: Write, B: Write>(
    list: Vec<EventCommand>,
    location: PageLocation<'_>,
    dialogues: &mut DialogueWriter<D>,
    database: &mut DatabaseWriter<B>,
    summary: &mut ExtractSummary,
) -> io::Result<Vec<EventCommand>> {
    let mut converted = Vec::with_capacity(list.len());
    let mut seq = 1;

    for cmd in list {
        match cmd.code {
            codes::SHOW_TEXT => {
                let id = location.text_id(seq);
                seq += 1;
                push_script_call(&mut converted, cmd.indent, "show_dialogue", &id);
                write_message_header(dialogues, &id, &cmd)?;
                summary.dialogues += 1;
            }
            codes::SHOW_SCROLLING_TEXT => {
                let id = location.text_id(seq);
                seq += 1;
                push_script_call(&mut converted, cmd.indent, "show_scrolling", &id);
                dialogues.write_id(&id)?;
                let speed = cmd.int_param(0);
                if speed != DEFAULT_SCROLL_SPEED {
                    dialogues.write_tag("scroll_speed", Some(&speed.to_string()))?;
                }
                if cmd.bool_param(1) {
                    dialogues.write_tag(NO_FAST_TAG, None)?;
                }
                summary.dialogues += 1;
            }
            codes::SHOW_TEXT_LINE | codes::SCROLLING_TEXT_LINE => {
                dialogues.write_line(cmd.str_param(0))?;
            }
            codes::SHOW_CHOICES => {
                let choices = cmd.str_list_param(0);
                if choices.iter().any(|c| DIALOGUE_CODE.is_match(c)) {
                    converted.push(cmd);
                    continue;
                }

                let mut references = Vec::with_capacity(choices.len());
                for choice in choices {
                    let id = location.text_id(seq);
                    seq += 1;
                    dialogues.write_id(&id)?;
                    dialogues.write_line(choice)?;
                    references.push(Value::String(dialogue_code(&id)));
                    summary.dialogues += 1;
                }

                let mut parameters = vec![Value::Array(references)];
                parameters.extend(cmd.parameters.iter().skip(1).cloned());
                converted.push(EventCommand::new(cmd.code, cmd.indent, parameters));
            }
            codes::CHANGE_NAME | codes::CHANGE_NICKNAME => {
                let name = cmd.str_param(1);
                if NAME_CODE.is_match(name) {
                    converted.push(cmd);
                    continue;
                }

                let key = name_key(name);
                database.write_entry(&DatabasePath::NameAlias { key: key.clone() }, name)?;
                summary.names += 1;

                let actor = cmd.parameters.first().cloned().unwrap_or(Value::Null);
                converted.push(EventCommand::new(
                    cmd.code,
                    cmd.indent,
                    vec![actor, Value::String(name_code(&key))],
                ));
            }
            _ => converted.push(cmd),
        }
    }

    Ok(converted)
}

/// Script call split over a Script command and its continuation line.
fn push_script_call(list: &mut Vec<EventCommand>, indent: u32, function: &str, id: &str) {
    list.push(EventCommand::new(
        codes::SCRIPT,
        indent,
        vec![Value::String(format!("{function}("))],
    ));
    list.push(EventCommand::new(
        codes::SCRIPT_LINE,
        indent,
        vec![Value::String(format!("\"{id}\")"))],
    ));
}

/// Text id and the non-default window settings of a Show Text command.
fn write_message_header<W: Write>(
    dialogues: &mut DialogueWriter<W>,
    id: &str,
    cmd: &EventCommand,
) -> io::Result<()> {
    dialogues.write_id(id)?;

    let face = cmd.str_param(0);
    if !face.is_empty() {
        dialogues.write_tag("face", Some(&format!("{face}, {}", cmd.int_param(1))))?;
    }

    let background = u8::try_from(cmd.int_param(2))
        .ok()
        .and_then(Background::from_code);
    if let Some(background) = background.filter(|b| *b != Background::Normal) {
        dialogues.write_tag("background", Some(background.as_tag()))?;
    }

    let position = u8::try_from(cmd.int_param(3))
        .ok()
        .and_then(Position::from_code);
    if let Some(position) = position.filter(|p| *p != Position::Bottom) {
        dialogues.write_tag("position", Some(position.as_tag()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(list: Vec<EventCommand>) -> (Vec<EventCommand>, String, String, ExtractSummary) {
        let mut dialogues = DialogueWriter::new(Vec::new());
        let mut database = DatabaseWriter::new(Vec::new());
        let mut summary = ExtractSummary::default();
        let location = PageLocation {
            prefix: "001:Castle/",
            event_id: 1,
            event_name: "Guard",
            page: 1,
        };
        let converted = extract_page(list, location, &mut dialogues, &mut database, &mut summary).unwrap();
        (
            converted,
            String::from_utf8(dialogues.into_inner()).unwrap(),
            String::from_utf8(database.into_inner()).unwrap(),
            summary,
        )
    }

    #[test]
    fn test_ids() {
        assert_eq!(map_prefix(1, "Castle Town Outskirts"), "001:Castle To/");
        assert_eq!(
            text_id(COMMON_EVENT_PREFIX, 12, "Inn Keeper Dialogue", 1, 3),
            "Common Events/012:Inn Keepe/Page 01/003"
        );
        assert_eq!(truncate("ÄÖÜäöüßéèx", 9), "ÄÖÜäöüßéè");
        assert_eq!(name_key("Gandalf The White"), "gandalf_the_white");
    }

    #[test]
    fn test_show_text() {
        let (converted, dialogues, _, summary) = run(vec![
            EventCommand::new(codes::SHOW_TEXT, 1, vec![json!("People4"), json!(6), json!(1), json!(0)]),
            EventCommand::new(codes::SHOW_TEXT_LINE, 1, vec![json!("Halt!")]),
            EventCommand::new(codes::SHOW_TEXT_LINE, 1, vec![json!("Who goes there?")]),
            EventCommand::new(0, 0, vec![]),
        ]);

        assert_eq!(
            dialogues,
            "\n<<001:Castle/001:Guard/Page 01/001>>\n<<face: People4, 6>>\n<<background: dim>>\n<<position: top>>\nHalt!\nWho goes there?\n"
        );
        assert_eq!(converted.len(), 3);
        assert_eq!(converted[0].code, codes::SCRIPT);
        assert_eq!(converted[0].str_param(0), "show_dialogue(");
        assert_eq!(converted[1].str_param(0), "\"001:Castle/001:Guard/Page 01/001\")");
        assert_eq!(converted[1].indent, 1);
        assert_eq!(summary.dialogues, 1);
    }

    #[test]
    fn test_default_window_settings_are_omitted() {
        let (_, dialogues, _, _) = run(vec![
            EventCommand::new(codes::SHOW_TEXT, 0, vec![json!(""), json!(0), json!(0), json!(2)]),
            EventCommand::new(codes::SHOW_TEXT_LINE, 0, vec![json!("Hello")]),
        ]);
        assert_eq!(dialogues, "\n<<001:Castle/001:Guard/Page 01/001>>\nHello\n");
    }

    #[test]
    fn test_choices_and_sequence() {
        let (converted, dialogues, _, _) = run(vec![
            EventCommand::new(codes::SHOW_TEXT, 0, vec![json!(""), json!(0), json!(0), json!(2)]),
            EventCommand::new(codes::SHOW_TEXT_LINE, 0, vec![json!("Rest here?")]),
            EventCommand::new(codes::SHOW_CHOICES, 0, vec![json!(["Yes", "No"]), json!(2)]),
        ]);

        assert!(dialogues.contains("<<001:Castle/001:Guard/Page 01/002>>\nYes\n"));
        assert!(dialogues.contains("<<001:Castle/001:Guard/Page 01/003>>\nNo\n"));
        let choices = &converted[2];
        assert_eq!(
            choices.parameters,
            vec![
                json!([
                    "\\dialogue[001:Castle/001:Guard/Page 01/002]",
                    "\\dialogue[001:Castle/001:Guard/Page 01/003]"
                ]),
                json!(2)
            ]
        );
    }

    #[test]
    fn test_converted_commands_are_kept() {
        let choices = EventCommand::new(codes::SHOW_CHOICES, 0, vec![json!(["\\dialogue[X]"]), json!(1)]);
        let name = EventCommand::new(codes::CHANGE_NICKNAME, 0, vec![json!(3), json!("\\name[boss]")]);
        let (converted, dialogues, database, _) = run(vec![choices.clone(), name.clone()]);
        assert_eq!(converted, vec![choices, name]);
        assert!(dialogues.is_empty());
        assert!(database.is_empty());
    }

    #[test]
    fn test_scrolling_text() {
        let (converted, dialogues, _, _) = run(vec![
            EventCommand::new(codes::SHOW_SCROLLING_TEXT, 0, vec![json!(4), json!(true)]),
            EventCommand::new(codes::SCROLLING_TEXT_LINE, 0, vec![json!("The End")]),
        ]);
        assert_eq!(
            dialogues,
            "\n<<001:Castle/001:Guard/Page 01/001>>\n<<scroll_speed: 4>>\n<<no_fast>>\nThe End\n"
        );
        assert_eq!(converted[0].str_param(0), "show_scrolling(");
    }

    #[test]
    fn test_change_name() {
        let (converted, _, database, summary) = run(vec![EventCommand::new(
            codes::CHANGE_NICKNAME,
            0,
            vec![json!(1), json!("The White")],
        )]);
        assert_eq!(database, "\n<<names:the_white>>\nThe White\n");
        assert_eq!(converted[0].code, codes::CHANGE_NICKNAME);
        assert_eq!(converted[0].parameters, vec![json!(1), json!("\\name[the_white]")]);
        assert_eq!(summary.names, 1);
    }
}
