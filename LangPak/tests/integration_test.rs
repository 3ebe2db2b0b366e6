//! End-to-end tests against a game directory on disk

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use langpak::config::SETTINGS_FILE_NAME;
use langpak::extract::GameContent;
use langpak::prelude::*;
use langpak::rvtext::formats::read_dialogues;

const SETTINGS: &str = r#"
[languages]
available = ["English", "Deutsch"]
default = "English"

[assets]
baseline = "baseline.json"
"#;

const BASELINE: &str = r#"{
    "items": {
        "actors": [{ "id": 1, "fields": { "name": "Eric", "nickname": "The Brave" } }],
        "classes": [{
            "id": 1,
            "fields": { "name": "Soldier" },
            "learnings": [
                { "level": 1, "skill_id": 3, "note": "" },
                { "level": 4, "skill_id": 9, "note": "" }
            ]
        }]
    },
    "system": { "game_title": "Quest", "currency_unit": "G" },
    "indexed": { "elements": ["", "Physical", "Fire"] }
}"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn game() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, SETTINGS_FILE_NAME, SETTINGS);
    write(root, "baseline.json", BASELINE);
    write(root, "Game.ini", "[Game]\r\nTitle=Quest\r\n");

    write(
        root,
        "DialoguesEnglish.rvtext",
        "<<Intro>>\n<<position: top>>\nWelcome, traveller.\nRest a while.\n\n<<Inn Yes>>\nYes\n",
    );
    write(
        root,
        "DialoguesDeutsch.rvtext",
        "<<Intro>>\n<<position: top>>\nWillkommen, Reisender.\nRuh dich aus.\n\n<<Inn Yes>>\nJa\n",
    );
    write(root, "DatabaseTextEnglish.rvtext", "<<system:game_title>>\nQuest\n");
    write(
        root,
        "DatabaseTextDeutsch.rvtext",
        "<<actors:1:name>>\nErich\n\
         <<classes:1:learnings:1>>\nFeuerzauber\n\
         <<types:elements:2>>\nFeuer\n\
         <<names:the_white>>\nDer Weisse\n\
         <<Vocab:ShopBuy>>\nKaufen\n",
    );
    dir
}

#[test]
fn test_switch_language_end_to_end() {
    let dir = game();
    let mut system = LanguageSystem::open(dir.path()).unwrap();

    let shop_buy = Rc::new(RefCell::new(String::from("Buy")));
    let target = Rc::clone(&shop_buy);
    system
        .constants_mut()
        .register("Vocab", "ShopBuy", move |value| *target.borrow_mut() = value.to_string());

    system.initialize().unwrap();
    assert_eq!(system.language(), Some("English"));
    let english = system.state();
    assert_eq!(english.resolve_field(ItemGroup::Actors, 1, "name").or_native("Eric"), "Eric");
    assert_eq!(*shop_buy.borrow(), "Buy");

    system.set_language("Deutsch").unwrap();
    let ini = fs::read_to_string(dir.path().join("Game.ini")).unwrap();
    assert_eq!(ini, "[Game]\r\nTitle=Quest\r\nLanguage=Deutsch\n");

    let german = system.state();
    assert_eq!(
        german.expand_message("\\dialogue[Intro]"),
        Some(vec!["Willkommen, Reisender.", "Ruh dich aus."])
    );
    assert_eq!(german.expand_choice("\\dialogue[Inn Yes]"), "Ja");
    assert_eq!(german.resolve_field(ItemGroup::Actors, 1, "name").or_native("Eric"), "Erich");
    assert_eq!(german.actor_text(1, "nickname", Some("\\name[the_white]"), "The Brave"), "Der Weisse");
    assert_eq!(
        german.merge_indexed(IndexedSet::Elements, &[String::new(), "Physical".to_string(), "Fire".to_string()]),
        ["", "Physical", "Feuer"]
    );
    assert_eq!(*shop_buy.borrow(), "Kaufen");

    // Learnings keep the baseline's other slots
    let learnings = german.class_learnings(1).unwrap();
    assert_eq!(learnings[1].skill_id, 9);
    assert_eq!(learnings[1].note, "Feuerzauber");

    // The English snapshot is still intact
    assert_eq!(english.resolve_dialogue("Intro").unwrap().first_line(), "Welcome, traveller.");

    // A fresh system picks the persisted language up
    let mut reopened = LanguageSystem::open(dir.path()).unwrap();
    reopened.initialize().unwrap();
    assert_eq!(reopened.language(), Some("Deutsch"));
}

#[test]
fn test_localized_entity_from_baseline() {
    let dir = game();
    let mut system = LanguageSystem::open(dir.path()).unwrap();
    system.set_language("Deutsch").unwrap();

    let snapshot = DatabaseSnapshot::load(dir.path().join("baseline.json")).unwrap();
    let state = system.state();
    let actor = Localized::new(snapshot.item(ItemGroup::Actors, 1).unwrap(), &state);
    assert_eq!(actor.name(), Some("Erich"));
    assert_eq!(actor.field("nickname"), Some("The Brave"));
}

#[test]
fn test_compile_then_load_compiled() {
    let dir = game();
    let system = LanguageSystem::open(dir.path()).unwrap();
    assert_eq!(system.compile_all().unwrap(), 4);
    assert!(dir.path().join("Data/DialoguesDeutsch.rvdata2").exists());

    // Text assets are no longer needed once compiled
    fs::remove_file(dir.path().join("DialoguesDeutsch.rvtext")).unwrap();
    let settings = fs::read_to_string(dir.path().join(SETTINGS_FILE_NAME)).unwrap();
    write(dir.path(), SETTINGS_FILE_NAME, &format!("{settings}enable_encryption = true\n"));

    let mut system = LanguageSystem::open(dir.path()).unwrap();
    system.set_language("Deutsch").unwrap();
    assert_eq!(system.state().dialogues().get_text("Inn Yes"), Some("Ja"));
    assert_eq!(system.state().class_learnings(1).unwrap().len(), 2);
}

#[test]
fn test_extract_then_load_as_language() {
    let dir = game();
    let mut content: GameContent = serde_json::from_value(json!({
        "maps": [{
            "id": 1,
            "name": "Inn",
            "events": [{ "id": 3, "name": "Innkeeper", "pages": [{ "list": [
                { "code": 101, "parameters": ["People1", 2, 0, 2] },
                { "code": 401, "parameters": ["Stay the night?"] },
                { "code": 102, "parameters": [["Yes", "No"], 2] },
                { "code": 0 }
            ]}]}]
        }]
    }))
    .unwrap();
    content.database = DatabaseSnapshot::load(dir.path().join("baseline.json")).unwrap();

    let out = dir.path().join("Extracted");
    let summary = extract_all(&mut content, &out, "rvtext").unwrap();
    assert_eq!(summary.dialogues, 3);

    let dialogues = read_dialogues(&summary.dialogue_path).unwrap();
    let message = dialogues.get("001:Inn/003:Innkeeper/Page 01/001").unwrap();
    assert_eq!(message.tag("face"), Some("People1, 2"));
    assert_eq!(message.text, "Stay the night?");

    // The extracted files work as a language of their own
    fs::copy(&summary.dialogue_path, dir.path().join("DialoguesEnglish.rvtext")).unwrap();
    fs::copy(&summary.database_path, dir.path().join("DatabaseTextEnglish.rvtext")).unwrap();
    let mut system = LanguageSystem::open(dir.path()).unwrap();
    system.initialize().unwrap();

    let state = system.state();
    // Show Text became a two-line script call
    let choices = &content.maps[0].events[0].pages[0].list[2];
    let labels: Vec<&str> = choices
        .str_list_param(0)
        .into_iter()
        .map(|choice| state.expand_choice(choice))
        .collect();
    assert_eq!(labels, ["Yes", "No"]);
    assert_eq!(state.resolve_system("currency_unit"), Resolution::Override("G"));
}

#[test]
fn test_missing_settings_is_single_language() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Dialogues.rvtext", "<<A>>\nHello\n");
    write(dir.path(), "DatabaseText.rvtext", "");

    let mut system = LanguageSystem::open(dir.path()).unwrap();
    system.initialize().unwrap();
    assert_eq!(system.language(), None);
    assert_eq!(system.state().dialogues().get_text("A"), Some("Hello"));
    assert!(matches!(system.set_language("English"), Err(Error::SingleLanguageMode)));
}
