use linepick::editor::engine::Engine;
use linepick::editor::state::EditOp;
use linepick::input::dispatch::Bindings;
use linepick::input::keys::{self, KeyEvent, KeyPhase, Modifiers};
use linepick::menu::history::History;
use linepick::menu::{Menu, Mode, Outcome};
use std::collections::BTreeMap;
use tempfile::TempDir;

const FILES: &[&str] = &[
    "src/main.rs",
    "src/lib.rs",
    "src/menu/mod.rs",
    "src/menu/history.rs",
    "README.md",
];

fn engine_with(menu: Menu) -> Engine<Menu> {
    let mut engine = Engine::new(menu, Bindings::default());
    engine.start("");
    engine
}

fn files() -> Menu {
    Menu::new(FILES.iter().map(|s| s.to_string()).collect())
}

fn type_text(engine: &mut Engine<Menu>, text: &str) {
    for c in text.chars() {
        let code = if c.is_ascii_alphabetic() {
            c.to_ascii_uppercase() as u32
        } else {
            keys::UNIDENTIFIED
        };
        engine.press(
            KeyEvent::new(code, Modifiers::NONE, KeyPhase::Down),
            EditOp::Insert(c),
        );
    }
}

fn press(engine: &mut Engine<Menu>, code: u32, modifiers: Modifiers) {
    engine.press(KeyEvent::new(code, modifiers, KeyPhase::Down), EditOp::None);
}

fn visible(engine: &Engine<Menu>) -> Vec<String> {
    engine.view().items().iter().map(|item| item.text()).collect()
}

#[test]
fn test_start_shows_everything_in_insert_mode() {
    let engine = engine_with(files());
    assert_eq!(visible(&engine).len(), FILES.len());
    assert_eq!(engine.view().prompt(), Mode::Insert.prompt());
    assert_eq!(engine.view().mode(), Some("insert"));
    assert_eq!(engine.view().counters(), (5, 5));
}

#[test]
fn test_typing_filters() {
    let mut engine = engine_with(files());
    type_text(&mut engine, "menu");

    assert_eq!(
        visible(&engine),
        vec!["src/menu/mod.rs", "src/menu/history.rs"]
    );
    assert_eq!(engine.view().counters(), (2, 5));
}

#[test]
fn test_not_found() {
    let mut engine = engine_with(files());
    type_text(&mut engine, "xyz");
    assert!(!engine.view().found());
    assert!(visible(&engine).is_empty());
}

#[test]
fn test_highlighted_partitions() {
    let mut engine = engine_with(files());
    type_text(&mut engine, "=lib");

    let item = &engine.view().items()[0];
    assert_eq!(item.spans[0].unmatched, "src/");
    assert_eq!(item.spans[0].matched, "lib");
    assert_eq!(item.spans.last().map(|s| s.matched.as_str()), Some(""));
}

#[test]
fn test_navigate_and_accept() {
    let mut engine = engine_with(files());
    type_text(&mut engine, "src");
    // Shorter lines rank first on equal match width
    assert_eq!(visible(&engine)[..2], ["src/lib.rs", "src/main.rs"]);

    press(&mut engine, keys::DOWN, Modifiers::NONE);
    assert_eq!(engine.view().selected(), Some(1));

    press(&mut engine, keys::ENTER, Modifiers::NONE);
    assert_eq!(
        engine.backend().outcome(),
        Some(&Outcome::Selected("src/main.rs".to_string()))
    );
}

#[test]
fn test_escape_dismisses() {
    let mut engine = engine_with(files());
    press(&mut engine, keys::ESCAPE, Modifiers::NONE);
    assert_eq!(engine.backend_mut().take_outcome(), Some(Outcome::Dismissed));
    assert_eq!(engine.backend().outcome(), None);
}

#[test]
fn test_accept_input_when_enabled() {
    let mut engine = engine_with(files().with_accept_input(true));
    type_text(&mut engine, "new");
    press(&mut engine, keys::ENTER, Modifiers::ALT);

    assert_eq!(
        engine.backend().outcome(),
        Some(&Outcome::Input("new".to_string()))
    );
}

#[test]
fn test_tab_completes_common_prefix() {
    let mut engine = engine_with(files().with_completion_sep(Some("/".to_string())));
    type_text(&mut engine, "src/m");
    press(&mut engine, keys::TAB, Modifiers::NONE);

    // "src/main.rs" has no further separator, "src/menu/..." completes to "src/menu/"
    assert_eq!(engine.editor().text(), "src/menu/");
}

#[test]
fn test_limit_reports_over_limit() {
    let mut engine = engine_with(files().with_limit(Some(2)));
    assert!(engine.view().is_over_limit());
    assert_eq!(visible(&engine).len(), 2);
    assert_eq!(engine.view().counters(), (5, 5));

    type_text(&mut engine, "READ");
    assert!(!engine.view().is_over_limit());
}

#[test]
fn test_history_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");

    let history = History::open(&path, "files").unwrap();
    let mut engine = engine_with(files().with_history(history));
    type_text(&mut engine, "READ");
    press(&mut engine, keys::ENTER, Modifiers::NONE);

    let stored: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["files"], vec!["READ"]);

    // A new session walks back to the stored input and returns to it
    let history = History::open(&path, "files").unwrap();
    let mut engine = engine_with(files().with_history(history));
    type_text(&mut engine, "sr");
    press(&mut engine, 'P' as u32, Modifiers::CONTROL);
    assert_eq!(engine.editor().text(), "READ");
    assert_eq!(engine.view().mode(), Some("history"));
    assert_eq!(visible(&engine), vec!["README.md"]);

    press(&mut engine, 'N' as u32, Modifiers::CONTROL);
    assert_eq!(engine.editor().text(), "sr");
}

#[test]
fn test_typing_after_history_returns_to_insert_mode() {
    let mut engine = engine_with(files());
    press(&mut engine, 'P' as u32, Modifiers::CONTROL);
    assert_eq!(engine.view().mode(), Some("history"));

    type_text(&mut engine, "a");
    assert_eq!(engine.view().mode(), Some("insert"));
}
