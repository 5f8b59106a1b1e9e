use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::{App, InputMode};

/// Handle terminal events
/// Returns true if the app should quit
pub async fn handle_events(app: &mut App) -> Result<bool> {
    // Poll for events with a timeout
    if event::poll(Duration::from_millis(100))? {
        match event::read()? {
            Event::Key(key) => {
                // Only handle key press events (not release) - important for Windows
                if key.kind != KeyEventKind::Press {
                    return Ok(app.should_quit());
                }

                // Handle Ctrl+C globally
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    return Ok(true);
                }

                match app.input_mode() {
                    InputMode::Normal => handle_normal_mode(app, key),
                    InputMode::Insert => handle_insert_mode(app, key),
                }
            }
            // Bracketed paste goes through the all-or-nothing bulk insert.
            Event::Paste(text) => {
                if let Some(token) = app.insert_token() {
                    app.insert_mode(token).enter_text(&text);
                }
            }
            _ => {}
        }
    }

    Ok(app.should_quit())
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') => {
            app.request_quit();
        }
        // Enter insert mode
        KeyCode::Char('i') => {
            app.enter_insert_mode();
            app.clear_status();
        }
        // Enter insert mode at end
        KeyCode::Char('a') => {
            app.enter_insert_mode_at_end();
            app.clear_status();
        }
        // Enter insert mode with cleared input
        KeyCode::Char('o') => {
            app.enter_insert_mode_with_clear();
            app.clear_status();
        }
        // Cycle rewrite style
        KeyCode::Tab => {
            app.next_style();
        }
        KeyCode::BackTab => {
            app.prev_style();
        }
        // Cycle tone
        KeyCode::Char('t') => {
            app.next_tone();
        }
        KeyCode::Char('T') => {
            app.prev_tone();
        }
        // Result selection
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next_result();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev_result();
        }
        // Copy selected result
        KeyCode::Char('y') => {
            app.copy_selected();
        }
        // Submit
        KeyCode::Enter => {
            app.submit();
        }
        _ => {}
    }
}

fn handle_insert_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Exit insert mode
        KeyCode::Esc => {
            app.enter_normal_mode();
        }
        // Submit
        KeyCode::Enter => {
            app.submit();
        }
        _ => {
            let Some(token) = app.insert_token() else {
                return;
            };
            let mut insert = app.insert_mode(token);

            match key.code {
                // Delete character
                KeyCode::Backspace => {
                    insert.delete_char();
                }
                // Delete character forward
                KeyCode::Delete => {
                    insert.delete_char_forward();
                }
                // Move cursor left
                KeyCode::Left => {
                    insert.move_cursor_left();
                }
                // Move cursor right
                KeyCode::Right => {
                    insert.move_cursor_right();
                }
                // Move to start
                KeyCode::Home => {
                    insert.reset_cursor();
                }
                // Move to end
                KeyCode::End => {
                    insert.move_cursor_end();
                }
                // Clear line
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    insert.clear_line();
                }
                // Delete word backwards
                KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    insert.delete_word_backwards();
                }
                // Insert character
                KeyCode::Char(c) => {
                    insert.enter_char(c);
                }
                _ => {}
            }
        }
    }
}
