#![cfg(feature = "std")]

//! Text rendering of a board for the command line.

use std::collections::BTreeSet;

use crate::board::Coordinate;
use crate::config::{BOARD_SIZE, GRID_LETTERS};
use crate::domain::Position;

/// Render one owner's grid. Rows are letters, columns numbers.
///
/// `S` marks an unhit ship cell (only when `reveal`), `X` a hit, `o` a
/// recorded miss and `.` water or unknown.
pub fn render_board(positions: &[Position], misses: &BTreeSet<Coordinate>, reveal: bool) -> String {
    let mut out = String::new();
    out.push_str("   ");
    for n in 1..=BOARD_SIZE {
        out.push_str(&format!("{:>3}", n));
    }
    out.push('\n');
    for (row, letter) in GRID_LETTERS.iter().enumerate() {
        out.push_str(&format!(" {} ", letter));
        for col in 0..BOARD_SIZE {
            let cell = Coordinate::new(row as u8, col).ok();
            let position = positions.iter().find(|p| Some(p.coordinate) == cell);
            let ch = match position {
                Some(p) if p.shot => 'X',
                Some(_) if reveal => 'S',
                _ if cell.is_some_and(|c| misses.contains(&c)) => 'o',
                _ => '.',
            };
            out.push_str(&format!("{:>3}", ch));
        }
        out.push('\n');
    }
    out
}
