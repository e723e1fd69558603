use std::io::{stdout, Stdout, Write};
use std::{io, time::Duration};

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use crate::engine::{Command, Display, InputSource};
use crate::geometry::{Coordinate, Direction};
use crate::palette::{Palette, Tint};

/// Crossterm-backed [`Display`]. Draw calls are queued on stdout and pushed
/// out together by `refresh`, one batch per frame.
pub struct Terminal {
    stdout: Stdout,
    palette: Palette,
}

impl Terminal {
    pub fn new(palette: Palette) -> Self {
        tracing::debug!(palette = %palette.name, "terminal display created");
        Terminal { stdout: stdout(), palette }
    }

    /// Puts the terminal into game mode: alternate screen, raw input, no
    /// cursor. [`Terminal::restore`] undoes all of it.
    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking)?;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen)?;
        Ok(())
    }

    fn queue_colors(&mut self, tint: Tint) -> io::Result<()> {
        let pair = self.palette.resolve(tint);
        queue!(self.stdout, SetForegroundColor(pair.fg), SetBackgroundColor(pair.bg))
    }
}

// Game coordinates are validated against the bounding area well before they
// get here, so the cast to terminal cells never truncates in practice.
fn cell(pos: Coordinate) -> (u16, u16) {
    (pos.x.max(0) as u16, pos.y.max(0) as u16)
}

impl Display for Terminal {
    fn clear(&mut self) -> io::Result<()> {
        self.queue_colors(Tint::Empty)?;
        queue!(self.stdout, terminal::Clear(ClearType::All))
    }

    fn put_char(&mut self, pos: Coordinate, glyph: char, tint: Tint) -> io::Result<()> {
        let (x, y) = cell(pos);
        self.queue_colors(tint)?;
        queue!(self.stdout, cursor::MoveTo(x, y), Print(glyph))
    }

    fn put_string(&mut self, pos: Coordinate, text: &str, tint: Tint) -> io::Result<()> {
        let (x, y) = cell(pos);
        self.queue_colors(tint)?;
        queue!(self.stdout, cursor::MoveTo(x, y), Print(text))
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

/// Non-blocking keyboard reader. Drains everything pending so stale
/// keypresses cannot pile up between frames; the latest command wins, except
/// that quit always wins.
pub struct Keyboard;

impl InputSource for Keyboard {
    fn poll_command(&mut self) -> io::Result<Option<Command>> {
        let mut command = None;

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Release {
                    continue;
                }
                match map_key(&ev) {
                    Some(Command::Quit) => return Ok(Some(Command::Quit)),
                    Some(steer) => command = Some(steer),
                    None => {}
                }
            }
        }

        Ok(command)
    }
}

fn map_key(ev: &KeyEvent) -> Option<Command> {
    if ev.modifiers.contains(KeyModifiers::CONTROL) && ev.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Steer(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Steer(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Steer(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Steer(Direction::Right)),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}
