use rand::Rng;

use crate::geometry::{BoundingArea, Coordinate};
use crate::palette::Tint;
use crate::snake::Snake;
use crate::state::RoundState;

/// The single live food item. Touching it with the head grows the snake and
/// re-rolls the food somewhere the snake is not.
pub struct Food {
    pos: Coordinate,
    glyph: char,
    bounds: BoundingArea,
}

impl Food {
    /// Seeds the food from the configured start cell, then immediately
    /// re-rolls so it never begins the round on top of the snake.
    pub fn new(start: Coordinate, glyph: char, bounds: BoundingArea, snake: &Snake, rng: &mut impl Rng) -> Self {
        let mut food = Food { pos: start, glyph, bounds };
        food.pick_new_spot(snake, rng);
        food
    }

    pub fn position(&self) -> Coordinate {
        self.pos
    }

    pub fn cell(&self) -> (Coordinate, char, Tint) {
        (self.pos, self.glyph, Tint::Secondary)
    }

    /// Grows the snake and re-places the food when the head has reached it.
    /// Returns true on consumption so the engine can bump the score. Frozen
    /// outside the game loop, like the snake.
    pub fn update(&mut self, snake: &mut Snake, state: &RoundState, rng: &mut impl Rng) -> bool {
        if *state != RoundState::GameLoop || snake.head_position() != self.pos {
            return false;
        }

        snake.grow();
        // exclusion list includes the segment that was just added
        self.pick_new_spot(snake, rng);
        true
    }

    /// Uniformly samples playable cells until one free of the snake comes
    /// up. Unbounded retry: the board vastly outnumbers the snake in normal
    /// play, and a completely full board is out of scope.
    pub fn pick_new_spot(&mut self, snake: &Snake, rng: &mut impl Rng) {
        loop {
            let candidate = Coordinate::new(
                rng.gen_range(1..=self.bounds.width - 1),
                rng.gen_range(1..=self.bounds.height - 1),
            );
            if !snake.positions().any(|pos| pos == candidate) {
                self.pos = candidate;
                break;
            }
        }
        tracing::info!(x = self.pos.x, y = self.pos.y, "new food placed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture(seed: u64) -> (Snake, Food, StdRng) {
        let area = BoundingArea::new(10, 10);
        let mut rng = StdRng::seed_from_u64(seed);
        let snake = Snake::new(Coordinate::new(5, 5), area, '<', '#');
        let food = Food::new(Coordinate::new(5, 5), '@', area, &snake, &mut rng);
        (snake, food, rng)
    }

    #[test]
    fn spawn_never_lands_on_the_snake() {
        for seed in 0..50 {
            let (snake, food, _) = fixture(seed);
            assert!(snake.positions().all(|pos| pos != food.position()));
            assert!(BoundingArea::new(10, 10).contains(food.position()));
        }
    }

    #[test]
    fn food_colliding_with_start_is_rerolled_before_play() {
        // food configured right on the snake's starting cell
        let (mut snake, mut food, mut rng) = fixture(7);
        assert_ne!(food.position(), Coordinate::new(5, 5));

        // first tick proceeds without a spurious grow
        let state = RoundState::GameLoop;
        let ate = food.update(&mut snake, &state, &mut rng);
        assert!(!ate);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn consumption_grows_and_replaces() {
        let (mut snake, mut food, mut rng) = fixture(3);
        let state = RoundState::GameLoop;

        // walk the head onto the food
        snake.set_position(food.position());
        let eaten_at = food.position();

        assert!(food.update(&mut snake, &state, &mut rng));
        assert_eq!(snake.len(), 2);
        assert_ne!(food.position(), eaten_at);
        assert!(snake.positions().all(|pos| pos != food.position()));
    }

    #[test]
    fn no_consumption_without_overlap() {
        let (mut snake, mut food, mut rng) = fixture(11);
        let state = RoundState::GameLoop;
        let spot = food.position();

        assert!(!food.update(&mut snake, &state, &mut rng));
        assert_eq!(snake.len(), 1);
        assert_eq!(food.position(), spot);
    }

    #[test]
    fn frozen_outside_the_game_loop() {
        let (mut snake, mut food, mut rng) = fixture(5);
        snake.set_position(food.position());

        let state = RoundState::Dead;
        assert!(!food.update(&mut snake, &state, &mut rng));
        assert_eq!(snake.len(), 1);
    }
}
