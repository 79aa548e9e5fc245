//! A fixed-size occupancy set packed into an unsigned integer.
//!
//! Used by placement to track which cells of an owner's grid are taken
//! without allocating. A `BitBoard<T, N>` covers an `N×N` grid and needs
//! `N * N <= T::BITS`.

use core::fmt;
use core::ops::{BitAnd, BitOr};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::board::Coordinate;
use crate::config::BOARD_SIZE;

/// Occupancy of one owner's 10×10 grid.
pub type Occupancy = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Row or column index is out of bounds [0..N).
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Empty board.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Board with every listed cell set.
    pub fn from_cells<I>(cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut board = Self::new();
        for cell in cells {
            board.insert(cell)?;
        }
        Ok(board)
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        let idx = Self::index(row, col)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let idx = Self::index(row, col)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Whether the cell at `coord` is occupied.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.get(coord.row() as usize, coord.col() as usize)
            .unwrap_or(false)
    }

    /// Mark the cell at `coord` as occupied.
    pub fn insert(&mut self, coord: Coordinate) -> Result<(), BitBoardError> {
        self.set(coord.row() as usize, coord.col() as usize)
    }

    /// True when no cell is set on both boards.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        (*self & *other).is_empty()
    }

    #[inline]
    fn index(row: usize, col: usize) -> Result<usize, BitBoardError> {
        if row >= N || col >= N {
            return Err(BitBoardError::IndexOutOfBounds { row, col });
        }
        Ok(row * N + col)
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}> [", N, N)?;
        for r in 0..N {
            write!(f, "  ")?;
            for c in 0..N {
                let bit = if self.get(r, c).unwrap_or(false) { '1' } else { '.' };
                write!(f, "{}", bit)?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}
