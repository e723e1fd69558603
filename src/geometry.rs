use serde::Deserialize;

use Direction::*;

/// A single grid cell. The origin is the top-left corner of the terminal,
/// y grows downwards.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Coordinate { x, y }
    }
}

/// The playable rectangle. Walls occupy row 0, row `height`, column 0 and
/// column `width`, so a cell is playable iff both components sit strictly
/// inside the walls.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BoundingArea {
    pub width: i32,
    pub height: i32,
}

impl BoundingArea {
    pub fn new(width: i32, height: i32) -> Self {
        BoundingArea { width, height }
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x >= 1 && coord.x <= self.width - 1 && coord.y >= 1 && coord.y <= self.height - 1
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn axis(&self) -> Axis {
        match self {
            Up | Down => Axis::Vertical,
            Left | Right => Axis::Horizontal,
        }
    }

    /// The cell one step away in this direction.
    pub fn step_from(&self, pos: Coordinate) -> Coordinate {
        match self {
            Up => Coordinate::new(pos.x, pos.y - 1),
            Down => Coordinate::new(pos.x, pos.y + 1),
            Left => Coordinate::new(pos.x - 1, pos.y),
            Right => Coordinate::new(pos.x + 1, pos.y),
        }
    }

    /// The mouth faces the direction the snake is going.
    pub fn mouth_glyph(&self) -> char {
        match self {
            Up => 'V',
            Down => 'Λ',
            Left => '>',
            Right => '<',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_reserve_one_cell_border() {
        let area = BoundingArea::new(10, 10);

        assert!(area.contains(Coordinate::new(1, 1)));
        assert!(area.contains(Coordinate::new(9, 9)));
        assert!(area.contains(Coordinate::new(5, 5)));

        assert!(!area.contains(Coordinate::new(0, 5)));
        assert!(!area.contains(Coordinate::new(5, 0)));
        assert!(!area.contains(Coordinate::new(10, 5)));
        assert!(!area.contains(Coordinate::new(5, 10)));
        assert!(!area.contains(Coordinate::new(-1, 5)));
    }

    #[test]
    fn steps_move_one_cell() {
        let pos = Coordinate::new(5, 5);
        assert_eq!(Up.step_from(pos), Coordinate::new(5, 4));
        assert_eq!(Down.step_from(pos), Coordinate::new(5, 6));
        assert_eq!(Left.step_from(pos), Coordinate::new(4, 5));
        assert_eq!(Right.step_from(pos), Coordinate::new(6, 5));
    }

    #[test]
    fn axes_pair_up() {
        assert_eq!(Up.axis(), Down.axis());
        assert_eq!(Left.axis(), Right.axis());
        assert_ne!(Up.axis(), Left.axis());
    }
}
