use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::editors::CellEditor;
use crate::sheet::{Cell, Column, Sheet};

use super::{App, Message, Model, ToastLevel, update};

fn test_sheet() -> Sheet {
    let columns = vec![
        Column::new("Rule", "text"),
        Column::new("Price", "price"),
        Column::new("Weight", "numeric"),
    ];
    let rows = vec![
        vec![
            Cell::new("standard"),
            Cell::new("$10.50"),
            Cell::new("2.5"),
        ],
        vec![
            Cell::new("express"),
            Cell::new("$1,200&nbsp;"),
            Cell::new("1"),
        ],
    ];
    Sheet::new(columns, rows)
}

fn create_test_model() -> Model {
    Model::new(PathBuf::from("test.csv"), test_sheet(), (80, 24))
}

fn create_long_test_model() -> Model {
    let columns = vec![Column::new("Rule", "text"), Column::new("Price", "price")];
    let rows = (0..50)
        .map(|i| vec![Cell::new(format!("rule-{i}")), Cell::new(format!("${i}.00"))])
        .collect();
    Model::new(PathBuf::from("test.csv"), Sheet::new(columns, rows), (80, 12))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn mouse_down(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn test_cursor_moves_and_clamps() {
    let model = create_test_model();
    let model = update(model, Message::CursorDown);
    assert_eq!(model.cursor, (1, 0));
    let model = update(model, Message::CursorDown);
    assert_eq!(model.cursor, (1, 0), "cursor stops at the last row");
    let model = update(model, Message::CursorRight);
    let model = update(model, Message::CursorRight);
    let model = update(model, Message::CursorRight);
    assert_eq!(model.cursor, (1, 2), "cursor stops at the last column");
}

#[test]
fn test_cursor_scrolls_viewport() {
    let mut model = create_long_test_model();
    for _ in 0..20 {
        model = update(model, Message::CursorDown);
    }
    assert_eq!(model.cursor.0, 20);
    assert!(
        model.viewport.visible_rows().contains(&20),
        "viewport follows the cursor"
    );
}

#[test]
fn test_start_edit_seeds_price_cell() {
    let mut model = create_test_model();
    model.cursor = (0, 1);
    let model = update(model, Message::StartEdit);

    let session = model.session.as_ref().expect("session opened");
    assert_eq!(session.editor.value(), "10.50");
    assert_eq!((session.row, session.col), (0, 1));
}

#[test]
fn test_start_edit_decodes_nbsp_and_keeps_grouped_digits() {
    let mut model = create_test_model();
    model.cursor = (1, 1);
    let model = update(model, Message::StartEdit);

    let session = model.session.as_ref().expect("session opened");
    assert_eq!(session.editor.value(), "1,200 ");
}

#[test]
fn test_commit_unchanged_leaves_cell_untouched() {
    let mut model = create_test_model();
    model.cursor = (0, 1);
    let model = update(model, Message::StartEdit);
    let model = update(model, Message::CommitEdit);

    assert!(model.session.is_none());
    assert!(!model.dirty);
    assert_eq!(model.sheet.cell(0, 1).unwrap().markup(), "$10.50");
}

#[test]
fn test_commit_changed_numeric_rewrites_markup() {
    let mut model = create_test_model();
    model.cursor = (0, 1);
    let mut model = update(model, Message::StartEdit);
    for _ in 0..5 {
        model = update(model, Message::InputBackspace);
    }
    for ch in "12.00".chars() {
        model = update(model, Message::InputChar(ch));
    }
    let model = update(model, Message::CommitEdit);

    assert!(model.dirty);
    assert_eq!(model.sheet.cell(0, 1).unwrap().markup(), "$12.00");
}

#[test]
fn test_commit_non_numeric_price_is_cancelled() {
    let mut model = create_test_model();
    model.cursor = (0, 1);
    let mut model = update(model, Message::StartEdit);
    for _ in 0..5 {
        model = update(model, Message::InputBackspace);
    }
    for ch in "abc".chars() {
        model = update(model, Message::InputChar(ch));
    }
    let model = update(model, Message::CommitEdit);

    assert!(!model.dirty);
    assert_eq!(model.sheet.cell(0, 1).unwrap().markup(), "$10.50");
}

#[test]
fn test_abandon_discards_a_valid_change() {
    let mut model = create_test_model();
    model.cursor = (0, 2);
    let mut model = update(model, Message::StartEdit);
    model = update(model, Message::InputChar('9'));
    let model = update(model, Message::AbandonEdit);

    assert!(!model.dirty);
    assert_eq!(model.sheet.cell(0, 2).unwrap().markup(), "2.5");
}

#[test]
fn test_text_editor_commits_any_change() {
    let mut model = create_test_model();
    model.cursor = (0, 0);
    let mut model = update(model, Message::StartEdit);
    model = update(model, Message::InputChar('!'));
    let model = update(model, Message::CommitEdit);

    assert!(model.dirty);
    assert_eq!(model.sheet.cell(0, 0).unwrap().markup(), "standard!");
}

#[test]
fn test_tab_commits_and_advances() {
    let mut model = create_test_model();
    model.cursor = (0, 1);
    let mut model = update(model, Message::StartEdit);
    model = update(model, Message::InputChar('9'));
    let model = update(model, Message::CommitEditAndAdvance);

    assert!(model.session.is_none());
    assert_eq!(model.cursor, (0, 2));
    assert_eq!(model.sheet.cell(0, 1).unwrap().markup(), "$10.509");
}

#[test]
fn test_click_away_ends_session_via_commit_path() {
    let mut model = create_test_model();
    model.cursor = (0, 1);
    let mut model = update(model, Message::StartEdit);
    model = update(model, Message::InputChar('9'));
    let model = update(model, Message::ClickCell(1, 0));

    assert!(model.session.is_none());
    assert_eq!(model.cursor, (1, 0));
    assert_eq!(
        model.sheet.cell(0, 1).unwrap().markup(),
        "$10.509",
        "valid change committed on click-away"
    );
}

#[test]
fn test_read_only_blocks_editing() {
    let mut model = create_test_model();
    model.read_only = true;
    let model = update(model, Message::StartEdit);
    assert!(model.session.is_none());
    assert!(model.active_toast().is_some());
}

#[test]
fn test_quit_requires_confirmation_when_dirty() {
    let mut model = create_test_model();
    model.dirty = true;

    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);

    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_confirmation_resets_on_other_activity() {
    let mut model = create_test_model();
    model.dirty = true;
    let model = update(model, Message::Quit);
    let model = update(model, Message::CursorDown);
    assert!(!model.quit_confirmed);
    let model = update(model, Message::Quit);
    assert!(!model.should_quit, "confirmation starts over");
}

#[test]
fn test_resize_updates_viewport() {
    let model = create_test_model();
    let model = update(model, Message::Resize(100, 40));
    assert_eq!(model.viewport.width(), 100);
    assert_eq!(model.viewport.height(), 38);
}

#[test]
fn test_toast_expires() {
    let mut model = create_test_model();
    model.show_toast(ToastLevel::Info, "hello");
    assert!(model.active_toast().is_some());
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(10)));
    assert!(model.active_toast().is_none());
}

#[test]
fn test_editing_keys_route_to_the_input() {
    let mut model = create_test_model();
    model.cursor = (0, 1);
    let model = update(model, Message::StartEdit);

    assert_eq!(
        App::handle_key(key(KeyCode::Char('9')), &model),
        Some(Message::InputChar('9'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &model),
        Some(Message::AbandonEdit)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &model),
        Some(Message::CommitEdit)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Tab), &model),
        Some(Message::CommitEditAndAdvance)
    );
}

#[test]
fn test_grid_keys_navigate_when_not_editing() {
    let model = create_test_model();
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &model),
        Some(Message::StartEdit)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('j')), &model),
        Some(Message::CursorDown)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q')), &model),
        Some(Message::Quit)
    );
}

#[test]
fn test_mouse_inside_editing_cell_stays_with_the_input() {
    let mut model = create_test_model();
    model.cursor = (0, 1);
    let model = update(model, Message::StartEdit);

    let rect = crate::ui::cell_rect(&model, 0, 1).expect("editing cell visible");
    let msg = App::handle_mouse(mouse_down(rect.x + 2, rect.y), &model);
    assert!(
        matches!(msg, Some(Message::InputClickAt(_))),
        "clicks inside the cell must not reach grid selection, got {msg:?}"
    );
}

#[test]
fn test_mouse_outside_editing_cell_ends_the_session() {
    let mut model = create_test_model();
    model.cursor = (0, 1);
    let model = update(model, Message::StartEdit);

    let rect = crate::ui::cell_rect(&model, 1, 0).expect("other cell visible");
    let msg = App::handle_mouse(mouse_down(rect.x + 1, rect.y), &model);
    assert_eq!(msg, Some(Message::ClickCell(1, 0)));
}

#[test]
fn test_save_side_effect_writes_and_clears_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.csv");
    std::fs::write(&path, "Rule,Price\nstandard,$10.50\n").unwrap();

    let sheet = crate::sheet::load(&path).unwrap();
    let mut model = Model::new(path.clone(), sheet, (80, 24));
    model.sheet.commit(0, 1, "12.00");
    model.dirty = true;

    let mut watcher = None;
    App::handle_message_side_effects(&mut model, &mut watcher, &Message::Save);

    assert!(!model.dirty);
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("$12.00"));
}

#[test]
fn test_reload_refused_while_editing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.csv");
    std::fs::write(&path, "Rule,Price\nstandard,$10.50\n").unwrap();

    let sheet = crate::sheet::load(&path).unwrap();
    let mut model = Model::new(path.clone(), sheet, (80, 24));
    model.cursor = (0, 1);
    model.start_edit();

    std::fs::write(&path, "Rule,Price\nstandard,$99.00\n").unwrap();
    let mut watcher = None;
    App::handle_message_side_effects(&mut model, &mut watcher, &Message::ForceReload);

    assert!(model.editing(), "session survives");
    assert_eq!(
        model.sheet.cell(0, 1).unwrap().markup(),
        "$10.50",
        "sheet not reloaded under an active session"
    );
}

#[test]
fn test_external_change_refused_when_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.csv");
    std::fs::write(&path, "Rule,Price\nstandard,$10.50\n").unwrap();

    let sheet = crate::sheet::load(&path).unwrap();
    let mut model = Model::new(path.clone(), sheet, (80, 24));
    model.sheet.commit(0, 1, "12.00");
    model.dirty = true;

    std::fs::write(&path, "Rule,Price\nstandard,$99.00\n").unwrap();
    let mut watcher = None;
    App::handle_message_side_effects(&mut model, &mut watcher, &Message::FileChanged);

    assert!(model.dirty, "local changes preserved");
    assert_eq!(model.sheet.cell(0, 1).unwrap().markup(), "$12.00");
}

#[test]
fn test_force_reload_picks_up_disk_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.csv");
    std::fs::write(&path, "Rule,Price\nstandard,$10.50\n").unwrap();

    let sheet = crate::sheet::load(&path).unwrap();
    let mut model = Model::new(path.clone(), sheet, (80, 24));

    std::fs::write(&path, "Rule,Price\nstandard,$99.00\nexpress,$5.00\n").unwrap();
    let mut watcher = None;
    App::handle_message_side_effects(&mut model, &mut watcher, &Message::ForceReload);

    assert_eq!(model.sheet.row_count(), 2);
    assert_eq!(model.sheet.cell(0, 1).unwrap().markup(), "$99.00");
}
