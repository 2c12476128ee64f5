//! Property-based tests for text box scrolling and capacity.

use proptest::prelude::*;
use termline::{CellBuffer, EditMode, KeyCode, KeyEvent, TextBox, TextBoxOptions};

// ============================================================================
// Strategies
// ============================================================================

/// Editing keys, excluding Enter (which ends the edit).
fn editing_key() -> impl Strategy<Value = KeyEvent> {
    prop_oneof![
        4 => prop::sample::select(vec!['a', 'b', 'é', '水', ' ']).prop_map(KeyEvent::char),
        1 => Just(KeyEvent::key(KeyCode::Left)),
        1 => Just(KeyEvent::key(KeyCode::Right)),
        1 => Just(KeyEvent::key(KeyCode::Home)),
        1 => Just(KeyEvent::key(KeyCode::End)),
        1 => Just(KeyEvent::key(KeyCode::Backspace)),
        1 => Just(KeyEvent::key(KeyCode::Delete)),
        1 => Just(KeyEvent::key(KeyCode::Insert)),
    ]
}

/// Display width and capacity of a box.
fn geometry() -> impl Strategy<Value = (u16, usize)> {
    (1u16..8, 1usize..16)
}

fn options(width: u16, max: usize) -> TextBoxOptions {
    TextBoxOptions::new(1, 0)
        .with_display_width(width)
        .with_max_codepoints(max)
}

/// What the focused box should show: the window of content starting at
/// the view position, blank-padded to the display width.
fn expected_window(content: &str, view: usize, width: usize) -> String {
    let shown: String = content.chars().skip(view).take(width).collect();
    let pad = width - shown.chars().count();
    format!("{shown}{}", " ".repeat(pad))
}

fn window(screen: &CellBuffer, width: u16) -> String {
    screen.row_text(0).chars().skip(1).take(usize::from(width)).collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// After every key the cursor is inside the content (one past the end
    /// when there is room) and inside the visible window.
    #[test]
    fn cursor_stays_visible((width, max) in geometry(), keys in prop::collection::vec(editing_key(), 0..60)) {
        let mut screen = CellBuffer::new(width + 2, 1);
        let mut textbox = TextBox::new(&mut screen, options(width, max)).unwrap();
        textbox.set_focus(true).unwrap();
        let width = usize::from(width);

        for key in &keys {
            textbox.accept_key_event(key).unwrap();

            let len = textbox.content().len();
            let cursor = textbox.cursor_position();
            let view = textbox.view_position();
            let padded = len + usize::from(len < max);

            prop_assert!(len <= max);
            prop_assert!(cursor <= len.min(max - 1));
            prop_assert!(view <= cursor, "view {} past cursor {}", view, cursor);
            prop_assert!(cursor < view + width, "cursor {} right of window at {}", cursor, view);
            if padded < width {
                prop_assert_eq!(view, 0);
            } else {
                prop_assert!(view <= padded - width);
            }

            let content = textbox.content().as_str().to_string();
            let screen = textbox.surface();
            prop_assert_eq!(window(screen, width as u16), expected_window(&content, view, width));
            prop_assert_eq!(screen.cursor(), Some((1 + (cursor - view) as u16, 0)));
        }
    }

    /// Redrawing a settled box changes nothing.
    #[test]
    fn redraw_is_idempotent((width, max) in geometry(), keys in prop::collection::vec(editing_key(), 0..40), focus in any::<bool>()) {
        let mut screen = CellBuffer::new(width + 2, 1);
        let mut textbox = TextBox::new(&mut screen, options(width, max)).unwrap();
        textbox.set_focus(true).unwrap();
        for key in &keys {
            textbox.accept_key_event(key).unwrap();
        }
        textbox.set_focus(focus).unwrap();

        textbox.redraw().unwrap();
        let before = (
            textbox.cursor_position(),
            textbox.view_position(),
            textbox.surface().clone(),
        );
        textbox.redraw().unwrap();
        let after = (
            textbox.cursor_position(),
            textbox.view_position(),
            textbox.surface().clone(),
        );
        prop_assert_eq!(before, after);
    }

    /// Typing one more codepoint than fits in insert mode keeps exactly
    /// the first `max` codepoints.
    #[test]
    fn insert_mode_respects_capacity((width, max) in geometry(), ch in prop::sample::select(vec!['q', 'ж', '字'])) {
        let mut screen = CellBuffer::new(width + 2, 1);
        let mut textbox = TextBox::new(&mut screen, options(width, max)).unwrap();
        prop_assert_eq!(textbox.mode(), EditMode::Insert);
        for _ in 0..=max {
            textbox.accept_key_event(&KeyEvent::char(ch)).unwrap();
        }
        prop_assert_eq!(textbox.content().len(), max);
        prop_assert_eq!(textbox.cursor_position(), max - 1);
    }

    /// Content is never longer than the capacity, whatever the keys.
    #[test]
    fn content_never_exceeds_capacity((width, max) in geometry(), keys in prop::collection::vec(editing_key(), 0..80)) {
        let mut screen = CellBuffer::new(width + 2, 1);
        let mut textbox = TextBox::new(&mut screen, options(width, max)).unwrap();
        for key in &keys {
            textbox.accept_key_event(key).unwrap();
            prop_assert!(textbox.content().len() <= max);
        }
    }
}
