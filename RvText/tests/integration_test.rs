use pretty_assertions::assert_eq;
use rvtext::prelude::*;
use tempfile::tempdir;

const DIALOGUES: &str = "\
<<Soldier Greeting>>
<<face: People4, 6>>
<<position: bottom>>
\\C[6]Soldier:\\C[0]
Greetings! Don't make any trouble!


<<Intro>>
<<scroll_speed: 4>>
<<no_fast>>
Long ago...

...in a kingdom far away.
";

const DATABASE: &str = "\
<<actors:1:name>>
Eric
<<actors:1:nickname>>
The Brave

<<classes:1:learnings:1>>
Learns Fire at level 5
<<system:game_title>>
The Quest
<<types:elements:2>>
Fire
<<terms:commands:0>>
Attack
<<maps:3:display_name>>
Castle Town
<<names:gandalf_newname>>
Gandalf the White
<<Vocab:ShopBuy>>
Purchase
";

struct Baseline;

impl BaselineDatabase for Baseline {
    fn class_learnings(&self, class_id: u32) -> Option<Vec<Learning>> {
        (class_id == 1).then(|| {
            vec![
                Learning {
                    level: 1,
                    skill_id: 8,
                    note: String::new(),
                },
                Learning {
                    level: 5,
                    skill_id: 51,
                    note: String::new(),
                },
            ]
        })
    }
}

#[test]
fn test_dialogue_file_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(text_file_name(AssetKind::Dialogues, Some("English"), "rvtext"));
    std::fs::write(&path, DIALOGUES.replace('\n', "\r\n")).unwrap();

    let table = read_dialogues(&path).unwrap();
    assert_eq!(table.len(), 2);

    let greeting = table.get("Soldier Greeting").unwrap();
    assert_eq!(greeting.text, "\\C[6]Soldier:\\C[0]\nGreetings! Don't make any trouble!");
    let options = MessageOptions::from_entry(greeting);
    assert_eq!(options.face.unwrap().index, 6);

    let intro = table.get("Intro").unwrap();
    assert_eq!(intro.text, "Long ago...\n\n...in a kingdom far away.");
    let scroll = ScrollOptions::from_entry(intro);
    assert_eq!(scroll.speed, Some(4));
    assert!(scroll.no_fast);
}

#[test]
fn test_database_file_resolves_every_path_kind() {
    let table = parse_database(DATABASE, &Baseline).unwrap();

    assert_eq!(table.item_field(ItemGroup::Actors, 1, "name"), Some("Eric"));
    assert_eq!(table.item_field(ItemGroup::Actors, 1, "nickname"), Some("The Brave"));
    assert_eq!(table.item_field(ItemGroup::Actors, 2, "name"), None);
    assert_eq!(table.class_learnings(1).unwrap()[1].note, "Learns Fire at level 5");
    assert_eq!(table.class_learnings(1).unwrap()[0].note, "");
    assert_eq!(table.system("game_title"), Some("The Quest"));
    assert_eq!(table.indexed(IndexedSet::Elements, 2), Some("Fire"));
    assert_eq!(table.indexed(IndexedSet::Commands, 0), Some("Attack"));
    assert_eq!(table.map_field(3, "display_name"), Some("Castle Town"));
    assert_eq!(table.name("gandalf_newname"), Some("Gandalf the White"));
    assert_eq!(table.constant("Vocab", "ShopBuy"), Some("Purchase"));
}

#[test]
fn test_database_error_aborts_whole_build() {
    let source = format!("{DATABASE}<<frobnicate:1:name>>\nX\n");
    let err = parse_database(&source, &Baseline).unwrap_err();
    let line = source.lines().count() - 1;
    assert!(matches!(err, Error::UnknownGroup { line: l, .. } if l == line));
    assert!(err.to_string().contains("frobnicate"));
}

#[test]
fn test_text_round_trip() {
    let dialogues = parse_dialogues(DIALOGUES).unwrap();
    assert_eq!(parse_dialogues(&dialogues.to_text()).unwrap(), dialogues);

    let database = parse_database(DATABASE, &Baseline).unwrap();
    assert_eq!(parse_database(&database.to_text(), &Baseline).unwrap(), database);
}

#[test]
fn test_compiled_assets_on_disk() {
    let dir = tempdir().unwrap();
    let dialogues = parse_dialogues(DIALOGUES).unwrap();
    let database = parse_database(DATABASE, &Baseline).unwrap();

    let dialogue_path = dir.path().join(compiled_file_name(AssetKind::Dialogues, Some("English")));
    let database_path = dir.path().join(compiled_file_name(AssetKind::DatabaseText, Some("English")));
    write_compiled(&dialogue_path, &dialogues).unwrap();
    write_compiled(&database_path, &database).unwrap();

    let loaded: DialogueTable = read_compiled(&dialogue_path).unwrap();
    assert_eq!(loaded, dialogues);
    let loaded: DatabaseTable = read_compiled(&database_path).unwrap();
    assert_eq!(loaded, database);

    let wrong = read_compiled::<DatabaseTable, _>(&dialogue_path);
    assert!(matches!(wrong, Err(Error::AssetKindMismatch { .. })));
}

#[test]
fn test_decompile_keeps_empty_learning_override() {
    let source = "<<classes:1:learnings:0>>\n<<actors:1:name>>\nEric\n";
    let database = parse_database(source, &Baseline).unwrap();

    let bytes = rvtext::compiled::encode(&database).unwrap();
    let text = rvtext::compiled::decode::<DatabaseTable>(&bytes).unwrap().to_text();
    assert_eq!(text, "\n<<actors:1:name>>\nEric\n\n<<classes:1:learnings:0>>\n");
    assert_eq!(parse_database(&text, &Baseline).unwrap(), database);
}
