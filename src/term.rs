use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    text::Line,
    widgets::Paragraph,
    Terminal,
};
use std::{
    io::{self, stdout, Stdout},
    time::Duration,
};

use crate::error::{Error, Result};
use crate::input::{InputSource, Key};
use crate::render::{game_over_lines, DisplaySink, Snapshot};

// ============================================================================
// Key Mapping
// ============================================================================

/// Arrows move, space rotates, Y/N answer the prompt. Ctrl-C is reported as an interrupt.
pub fn map_key(key: KeyEvent) -> Result<Option<Key>> {
    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Err(Error::Interrupted),
            _ => Ok(None),
        };
    }
    Ok(match key.code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Rotate),
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(Key::Yes),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Key::No),
        _ => None,
    })
}

/// Reads keys from the terminal with crossterm's non-blocking poll.
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn next_key(&mut self, timeout: Duration) -> Result<Option<Key>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => map_key(key),
            _ => Ok(None),
        }
    }
}

// ============================================================================
// Terminal Display
// ============================================================================

/// Owns the terminal for the process lifetime: raw mode, alternate screen, hidden cursor.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalDisplay {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(Hide)?;
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    fn draw_lines(&mut self, lines: Vec<String>) -> io::Result<()> {
        let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
        self.terminal.draw(|frame| {
            let area = frame.size();
            frame.render_widget(Paragraph::new(text), area);
        })?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        stdout().execute(Show)?;
        stdout().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl DisplaySink for TerminalDisplay {
    fn draw(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.draw_lines(snapshot.to_lines())?;
        Ok(())
    }

    fn show_game_over(&mut self, score: u32) -> Result<()> {
        self.terminal.clear()?;
        self.draw_lines(game_over_lines(score))?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_space_and_prompt_keys_are_mapped() {
        assert_eq!(map_key(press(KeyCode::Left)).unwrap(), Some(Key::Left));
        assert_eq!(map_key(press(KeyCode::Right)).unwrap(), Some(Key::Right));
        assert_eq!(map_key(press(KeyCode::Down)).unwrap(), Some(Key::Down));
        assert_eq!(map_key(press(KeyCode::Char(' '))).unwrap(), Some(Key::Rotate));
        assert_eq!(map_key(press(KeyCode::Char('y'))).unwrap(), Some(Key::Yes));
        assert_eq!(map_key(press(KeyCode::Char('N'))).unwrap(), Some(Key::No));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(map_key(press(KeyCode::Up)).unwrap(), None);
        assert_eq!(map_key(press(KeyCode::Char('q'))).unwrap(), None);
        assert_eq!(map_key(press(KeyCode::Esc)).unwrap(), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release).unwrap(), None);
    }

    #[test]
    fn ctrl_c_interrupts() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(map_key(ctrl_c), Err(Error::Interrupted)));
    }
}
