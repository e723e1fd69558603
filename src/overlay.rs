use std::io;

use crate::config::BorderConfig;
use crate::engine::Display;
use crate::geometry::Coordinate;
use crate::palette::Tint;
use crate::state::RoundState;

/// The wall around the playable field. Draw-only; collision with it is
/// handled by the snake.
pub struct Boundary {
    width: i32,
    height: i32,
    horizontal_glyph: char,
    vertical_glyph: char,
}

impl Boundary {
    pub fn new(border: &BorderConfig) -> Self {
        Boundary {
            width: border.width,
            height: border.height,
            horizontal_glyph: border.horizontal_wall_char,
            vertical_glyph: border.vertical_wall_char,
        }
    }

    pub fn draw<D: Display>(&self, display: &mut D) -> io::Result<()> {
        for x in 0..=self.width {
            display.put_char(Coordinate::new(x, 0), self.horizontal_glyph, Tint::Border)?;
            display.put_char(Coordinate::new(x, self.height), self.horizontal_glyph, Tint::Border)?;
        }
        for y in 1..self.height {
            display.put_char(Coordinate::new(0, y), self.vertical_glyph, Tint::Border)?;
            display.put_char(Coordinate::new(self.width, y), self.vertical_glyph, Tint::Border)?;
        }
        Ok(())
    }
}

const LOSE_TEXT: &str = "You lose!";
const LOSE_TEXT_POS: Coordinate = Coordinate { x: 4, y: 4 };

/// Read-only text layer over the game state: the score line under the
/// bottom wall, plus the lose banner once the snake has died.
pub struct Hud {
    score_row: i32,
    show_lose_banner: bool,
}

impl Hud {
    pub fn new(border: &BorderConfig) -> Self {
        Hud {
            score_row: border.height + 1,
            show_lose_banner: false,
        }
    }

    /// Moves the round from Dead to ShowScore once the lose banner is up.
    pub fn update(&mut self, state: &mut RoundState) {
        if *state == RoundState::Dead {
            self.show_lose_banner = true;
            state.transition(RoundState::ShowScore);
        }
    }

    pub fn draw<D: Display>(&self, display: &mut D, score: u32) -> io::Result<()> {
        let label = "score: ";
        display.put_string(Coordinate::new(0, self.score_row), label, Tint::Tertiary)?;
        display.put_string(
            Coordinate::new(label.len() as i32, self.score_row),
            &score.to_string(),
            Tint::Secondary,
        )?;

        if self.show_lose_banner {
            display.put_string(LOSE_TEXT_POS, LOSE_TEXT, Tint::Tertiary)?;
        }
        Ok(())
    }
}
