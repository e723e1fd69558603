use std::io;
use std::thread::sleep;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::config::Config;
use crate::food::Food;
use crate::geometry::{Coordinate, Direction};
use crate::overlay::{Boundary, Hud};
use crate::palette::Tint;
use crate::snake::Snake;
use crate::state::RoundState;

/// A decoded player command, already mapped from raw key events.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Steer(Direction),
    Quit,
}

/// The screen the engine draws on. The crossterm terminal implements this
/// for real play; tests substitute a recording fake.
pub trait Display {
    fn clear(&mut self) -> io::Result<()>;
    fn put_char(&mut self, pos: Coordinate, glyph: char, tint: Tint) -> io::Result<()>;
    fn put_string(&mut self, pos: Coordinate, text: &str, tint: Tint) -> io::Result<()>;
    fn refresh(&mut self) -> io::Result<()>;
}

impl<T: Display + ?Sized> Display for &mut T {
    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }
    fn put_char(&mut self, pos: Coordinate, glyph: char, tint: Tint) -> io::Result<()> {
        (**self).put_char(pos, glyph, tint)
    }
    fn put_string(&mut self, pos: Coordinate, text: &str, tint: Tint) -> io::Result<()> {
        (**self).put_string(pos, text, tint)
    }
    fn refresh(&mut self) -> io::Result<()> {
        (**self).refresh()
    }
}

/// Non-blocking command source. `None` means no key was pressed, which is a
/// perfectly fine tick.
pub trait InputSource {
    fn poll_command(&mut self) -> io::Result<Option<Command>>;
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// The tick loop was driven outside its documented invariant. This is a
    /// programming error, not a game event.
    #[error("tick dispatched while the round is in state \"{0}\"")]
    InvalidState(RoundState),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Owns every game object and the round state, and drives the
/// input → update → render cycle. Nothing outside the engine holds a
/// mutable handle to the round state; updates receive it by reference for
/// the duration of their call.
pub struct Engine<D: Display, I: InputSource> {
    display: D,
    input: I,
    rng: StdRng,
    frame_delay: Duration,
    state: RoundState,
    score: u32,
    snake: Snake,
    food: Food,
    boundary: Boundary,
    hud: Hud,
}

impl<D: Display, I: InputSource> Engine<D, I> {
    pub fn new(config: &Config, display: D, input: I) -> Self {
        Self::with_rng(config, display, input, StdRng::from_entropy())
    }

    /// Like [`Engine::new`] but with a caller-supplied rng, so tests can
    /// seed food placement.
    pub fn with_rng(config: &Config, display: D, input: I, mut rng: StdRng) -> Self {
        let area = config.bounding_area();
        let snake = Snake::new(
            config.snake.start,
            area,
            config.snake.head_char,
            config.snake.body_char,
        );
        let food = Food::new(config.food.start, config.food.char, area, &snake, &mut rng);

        Engine {
            display,
            input,
            rng,
            frame_delay: config.frame_delay(),
            state: RoundState::Init,
            score: 0,
            snake,
            food,
            boundary: Boundary::new(&config.border),
            hud: Hud::new(&config.border),
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food_position(&self) -> Coordinate {
        self.food.position()
    }

    /// The Init → GameLoop edge. Fails on anything but a fresh round.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state != RoundState::Init {
            return Err(EngineError::InvalidState(self.state));
        }
        self.state.transition(RoundState::GameLoop);
        Ok(())
    }

    /// Runs the round from Init to Exit, sleeping out the fixed frame
    /// interval between ticks.
    pub fn run(&mut self) -> Result<(), EngineError> {
        self.start()?;

        while self.state != RoundState::Exit {
            self.tick()?;
            if self.state != RoundState::Exit {
                sleep(self.frame_delay);
            }
        }
        Ok(())
    }

    /// One tick: poll input, apply quit, update snake then food then hud in
    /// that fixed order, then render everything. Quit short-circuits the
    /// whole tick; a tick in Init or Exit is a consistency fault.
    pub fn tick(&mut self) -> Result<(), EngineError> {
        let command = self.input.poll_command()?;

        if command == Some(Command::Quit) {
            self.state.transition(RoundState::Exit);
            return Ok(());
        }

        match self.state {
            RoundState::GameLoop => {
                if let Some(Command::Steer(direction)) = command {
                    // same-axis requests are silently rejected
                    let _ = self.snake.change_direction(direction);
                }

                self.snake.update(&mut self.state);
                if self.food.update(&mut self.snake, &self.state, &mut self.rng) {
                    self.score += 1;
                }
                self.hud.update(&mut self.state);
                self.draw()?;
            }
            RoundState::Dead | RoundState::ShowScore => {
                self.hud.update(&mut self.state);
                self.draw()?;
            }
            RoundState::Init | RoundState::Exit => {
                return Err(EngineError::InvalidState(self.state));
            }
        }

        Ok(())
    }

    /// Renders the frame in a fixed order: boundary, snake chain head to
    /// tail, food, hud. Pure function of the game state, safe to repeat
    /// between updates.
    fn draw(&mut self) -> io::Result<()> {
        self.display.clear()?;
        self.boundary.draw(&mut self.display)?;
        for (pos, glyph, tint) in self.snake.cells() {
            self.display.put_char(pos, glyph, tint)?;
        }
        let (pos, glyph, tint) = self.food.cell();
        self.display.put_char(pos, glyph, tint)?;
        self.hud.draw(&mut self.display, self.score)?;
        self.display.refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullDisplay;

    impl Display for NullDisplay {
        fn clear(&mut self) -> io::Result<()> {
            Ok(())
        }
        fn put_char(&mut self, _: Coordinate, _: char, _: Tint) -> io::Result<()> {
            Ok(())
        }
        fn put_string(&mut self, _: Coordinate, _: &str, _: Tint) -> io::Result<()> {
            Ok(())
        }
        fn refresh(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Script(Vec<Option<Command>>);

    impl InputSource for Script {
        fn poll_command(&mut self) -> io::Result<Option<Command>> {
            Ok(if self.0.is_empty() { None } else { self.0.remove(0) })
        }
    }

    fn engine(commands: Vec<Option<Command>>) -> Engine<NullDisplay, Script> {
        let rng = StdRng::seed_from_u64(42);
        Engine::with_rng(&Config::default(), NullDisplay, Script(commands), rng)
    }

    #[test]
    fn tick_in_init_is_a_fault() {
        let mut engine = engine(vec![]);
        assert!(matches!(
            engine.tick(),
            Err(EngineError::InvalidState(RoundState::Init))
        ));
    }

    #[test]
    fn quit_short_circuits_the_tick() {
        let mut engine = engine(vec![Some(Command::Quit)]);
        engine.start().unwrap();
        let head = engine.snake.head_position();

        engine.tick().unwrap();

        assert_eq!(engine.state(), RoundState::Exit);
        // the snake did not move this tick
        assert_eq!(engine.snake.head_position(), head);
    }

    #[test]
    fn tick_after_exit_is_a_fault() {
        let mut engine = engine(vec![Some(Command::Quit)]);
        engine.start().unwrap();
        engine.tick().unwrap();

        assert!(matches!(
            engine.tick(),
            Err(EngineError::InvalidState(RoundState::Exit))
        ));
    }

    #[test]
    fn empty_poll_still_advances_the_snake() {
        let mut engine = engine(vec![]);
        engine.start().unwrap();
        let head = engine.snake.head_position();

        engine.tick().unwrap();

        assert_eq!(engine.snake.head_position(), Direction::Right.step_from(head));
    }

    #[test]
    fn score_tracks_chain_length() {
        let mut engine = engine(vec![]);
        engine.start().unwrap();

        for _ in 0..20 {
            if engine.state() != RoundState::GameLoop {
                break;
            }
            engine.tick().unwrap();
            assert_eq!(engine.score() as usize, engine.snake().len() - 1);
        }
    }
}
