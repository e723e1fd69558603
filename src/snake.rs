use crate::geometry::{BoundingArea, Coordinate, Direction};
use crate::palette::Tint;
use crate::state::RoundState;

const DEAD_GLYPH: char = 'X';

/// One piece of the snake. Segments live in the arena owned by [`Snake`];
/// `next` is the arena index of the segment behind this one, `None` at the
/// tail. The chain is acyclic with exactly one tail.
struct Segment {
    pos: Coordinate,
    prev: Coordinate,
    glyph: char,
    tint: Tint,
    next: Option<usize>,
}

/// The player-controlled snake: a head with a directed chain of body
/// segments trailing it. Created once per round at length 1; a new round
/// builds a fresh snake instead of reviving this one.
pub struct Snake {
    segments: Vec<Segment>,
    head: usize,
    direction: Direction,
    bounds: BoundingArea,
    body_glyph: char,
}

impl Snake {
    pub fn new(start: Coordinate, bounds: BoundingArea, head_glyph: char, body_glyph: char) -> Self {
        tracing::info!(x = start.x, y = start.y, "new snake head created");
        let head = Segment {
            pos: start,
            prev: start,
            glyph: head_glyph,
            tint: Tint::Primary,
            next: None,
        };
        Snake {
            segments: vec![head],
            head: 0,
            direction: Direction::Right,
            bounds,
            body_glyph,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn head_position(&self) -> Coordinate {
        self.segments[self.head].pos
    }

    pub fn len(&self) -> usize {
        self.chain().count()
    }

    /// Attempts to steer the head. A request on the same axis as the current
    /// direction is rejected so the snake cannot reverse into its own neck.
    /// Latest accepted request wins; nothing is queued.
    pub fn change_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.axis() == self.direction.axis() {
            return false;
        }

        self.direction = new_direction;
        self.segments[self.head].glyph = new_direction.mouth_glyph();
        tracing::debug!(?new_direction, "snake head changed direction");
        true
    }

    /// The cell the head would occupy after the next step. No side effects.
    pub fn next_position(&self) -> Coordinate {
        self.direction.step_from(self.head_position())
    }

    /// Advances the snake one cell, or kills it. Only runs while the round
    /// is in the game loop; in every other state the chain is frozen.
    pub fn update(&mut self, state: &mut RoundState) {
        if *state != RoundState::GameLoop {
            return;
        }

        let next = self.next_position();
        if self.positions().any(|pos| pos == next) {
            tracing::info!(x = next.x, y = next.y, "snake collided with itself and died");
            self.die(state);
        } else if !self.bounds.contains(next) {
            tracing::info!(x = next.x, y = next.y, "snake collided with the barrier and died");
            self.die(state);
        } else {
            self.set_position(next);
        }
    }

    /// Moves the head and propagates the displacement down the chain:
    /// segment *i* takes the cell segment *i−1* occupied one tick earlier,
    /// which makes the body trail the head without storing path history.
    pub fn set_position(&mut self, new_pos: Coordinate) {
        let mut incoming = new_pos;
        let mut cursor = Some(self.head);
        while let Some(idx) = cursor {
            let segment = &mut self.segments[idx];
            segment.prev = segment.pos;
            segment.pos = incoming;
            incoming = segment.prev;
            cursor = segment.next;
        }
    }

    /// Appends exactly one segment at the tail's last previous position, so
    /// the new piece starts collocated with where the tail just was and the
    /// chain shows no gap on the next step.
    pub fn grow(&mut self) {
        let mut tail = self.head;
        while let Some(next) = self.segments[tail].next {
            tail = next;
        }

        let spawn = self.segments[tail].prev;
        let idx = self.segments.len();
        self.segments.push(Segment {
            pos: spawn,
            prev: spawn,
            glyph: self.body_glyph,
            tint: Tint::Primary,
            next: None,
        });
        self.segments[tail].next = Some(idx);
        tracing::info!(x = spawn.x, y = spawn.y, "new snake segment created");
    }

    /// Current position of every segment, head first.
    pub fn positions(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.chain().map(|segment| segment.pos)
    }

    /// Drawable view of the chain, head first: position, glyph and tint.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, char, Tint)> + '_ {
        self.chain().map(|segment| (segment.pos, segment.glyph, segment.tint))
    }

    fn chain(&self) -> impl Iterator<Item = &Segment> + '_ {
        let mut cursor = Some(self.head);
        std::iter::from_fn(move || {
            let idx = cursor?;
            let segment = &self.segments[idx];
            cursor = segment.next;
            Some(segment)
        })
    }

    fn die(&mut self, state: &mut RoundState) {
        state.transition(RoundState::Dead);
        for segment in &mut self.segments {
            segment.glyph = DEAD_GLYPH;
            segment.tint = Tint::Secondary;
        }
    }
}
