//! Grid geometry: coordinates on the 10×10 board and ship line projection.
//!
//! Rows are letters `A`-`J`, columns are numbers `1`-`10`. Internally both
//! are zero-based indices.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt;
use core::str::FromStr;
use rand::Rng;

use crate::common::GameError;
use crate::config::{BOARD_SIZE, GRID_LETTERS};

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "(u8, u8)", into = "(u8, u8)"))]
pub struct Coordinate {
    row: u8,
    col: u8,
}

/// Direction a ship extends from its start cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Number increases.
    Horizontal,
    /// Letter increases.
    Vertical,
}

impl Orientation {
    /// Pick an orientation with equal probability.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

impl Coordinate {
    /// Build from zero-based row (letter) and column (number) indices.
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GameError::OutOfBounds);
        }
        Ok(Self { row, col })
    }

    /// Zero-based letter index.
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Zero-based number index.
    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn letter(&self) -> char {
        GRID_LETTERS[self.row as usize]
    }

    /// One-based number as written on the board.
    pub fn number(&self) -> u8 {
        self.col + 1
    }

    /// Uniformly random cell anywhere on the grid.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            row: rng.random_range(0..BOARD_SIZE),
            col: rng.random_range(0..BOARD_SIZE),
        }
    }

    /// Every cell of the grid, row by row.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coordinate { row, col }))
    }

    /// Neighbour `step` cells away in `orientation`, if still on the grid.
    fn step(self, orientation: Orientation, step: usize) -> Option<Coordinate> {
        let (row, col) = match orientation {
            Orientation::Horizontal => (self.row as usize, self.col as usize + step),
            Orientation::Vertical => (self.row as usize + step, self.col as usize),
        };
        if row < BOARD_SIZE as usize && col < BOARD_SIZE as usize {
            Some(Coordinate {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

/// Parse text like `A1` or `j10`.
pub fn parse_coordinate(input: &str) -> Result<Coordinate, GameError> {
    let input = input.trim();
    let mut chars = input.chars();
    let letter = chars
        .next()
        .ok_or(GameError::MalformedCoordinate)?
        .to_ascii_uppercase();
    let row = GRID_LETTERS
        .iter()
        .position(|&l| l == letter)
        .ok_or(GameError::MalformedCoordinate)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GameError::MalformedCoordinate);
    }
    let number: u8 = digits.parse().map_err(|_| GameError::MalformedCoordinate)?;
    if number == 0 || number > BOARD_SIZE {
        return Err(GameError::MalformedCoordinate);
    }
    Ok(Coordinate {
        row: row as u8,
        col: number - 1,
    })
}

/// Cells a ship of `length` covers from `start`, in order. Fails instead of
/// clipping or wrapping when the line leaves the grid.
pub fn project_line(
    start: Coordinate,
    orientation: Orientation,
    length: usize,
) -> Result<Vec<Coordinate>, GameError> {
    (0..length)
        .map(|i| start.step(orientation, i).ok_or(GameError::OutOfBounds))
        .collect()
}

// Decoded cells go through `Coordinate::new`, so stored data can never
// produce an off-grid coordinate.
impl TryFrom<(u8, u8)> for Coordinate {
    type Error = GameError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Coordinate::new(row, col)
    }
}

impl From<Coordinate> for (u8, u8) {
    fn from(c: Coordinate) -> Self {
        (c.row, c.col)
    }
}

impl FromStr for Coordinate {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_coordinate(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_corners() {
        assert_eq!(parse_coordinate("A1").unwrap(), Coordinate::new(0, 0).unwrap());
        assert_eq!(parse_coordinate("J10").unwrap(), Coordinate::new(9, 9).unwrap());
        assert_eq!(parse_coordinate(" c7 ").unwrap().to_string(), "C7");
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "A", "K1", "A0", "A11", "1A", "A-1", "AA1", "A 1"] {
            assert_eq!(parse_coordinate(bad), Err(GameError::MalformedCoordinate), "{}", bad);
        }
    }

    #[test]
    fn projects_vertical_line() {
        let start = parse_coordinate("B3").unwrap();
        let line = project_line(start, Orientation::Vertical, 4).unwrap();
        let names: Vec<_> = line.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, ["B3", "C3", "D3", "E3"]);
    }

    #[test]
    fn projection_never_wraps() {
        let start = parse_coordinate("A7").unwrap();
        assert_eq!(
            project_line(start, Orientation::Horizontal, 5),
            Err(GameError::OutOfBounds)
        );
        let start = parse_coordinate("G1").unwrap();
        assert_eq!(
            project_line(start, Orientation::Vertical, 5),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn off_grid_pair_is_rejected() {
        assert_eq!(Coordinate::try_from((9, 9)), Coordinate::new(9, 9));
        assert_eq!(Coordinate::try_from((200, 0)), Err(GameError::OutOfBounds));
        assert_eq!(<(u8, u8)>::from(Coordinate::new(3, 4).unwrap()), (3, 4));
    }

    #[test]
    fn all_covers_grid() {
        assert_eq!(Coordinate::all().count(), 100);
    }
}
