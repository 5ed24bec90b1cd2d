use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use my_garden::core::{GardenConfig, GardenState, Grid, SimpleRng};
use my_garden::input::{handle_key_event, should_quit, InputMode};
use my_garden::types::{GardenAction, Point};

fn feed(state: &mut GardenState, keys: &[KeyCode]) {
    for &code in keys {
        let mode = InputMode::from_menu_open(state.is_menu_open());
        if let Some(action) = handle_key_event(KeyEvent::from(code), mode) {
            state.apply_action(action);
        }
    }
}

#[test]
fn test_keys_drive_cursor_and_menu() {
    let mut state = GardenState::from_grid(
        Grid::new(4, 4).unwrap(),
        Point::new(0, 0),
        SimpleRng::new(1),
        GardenConfig::default().with_size(4, 4),
    );

    feed(&mut state, &[KeyCode::Char('d'), KeyCode::Down, KeyCode::Enter]);
    assert_eq!(state.player().cursor(), Point::new(1, 1));
    assert!(state.is_menu_open());

    // In the menu, 'd' means nothing and Esc closes it.
    feed(&mut state, &[KeyCode::Char('d'), KeyCode::Esc]);
    assert!(!state.is_menu_open());
    assert_eq!(state.player().cursor(), Point::new(1, 1));

    feed(&mut state, &[KeyCode::Char('f')]);
    assert!(!state.player().is_idle());
}

#[test]
fn test_escape_quits_only_outside_menus() {
    let esc = KeyEvent::from(KeyCode::Esc);
    assert!(should_quit(esc, InputMode::Garden));
    assert!(!should_quit(esc, InputMode::Menu));
    assert_eq!(
        handle_key_event(esc, InputMode::Menu),
        Some(GardenAction::MenuCancel)
    );
    assert!(should_quit(
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        InputMode::Garden
    ));
}
