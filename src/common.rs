//! Error types shared by every layer of the engine.

#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use crate::bitboard::BitBoardError;
use crate::domain::GameStatus;
use crate::ship::{Owner, ShipType};

/// Failures reported by a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    Conflict(String),
    /// The requested record does not exist.
    NotFound(String),
    /// The backend itself failed; carried through unchanged.
    Backend(String),
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::Conflict(what) => write!(f, "Conflict: {}", what),
            StoreError::NotFound(what) => write!(f, "Not found: {}", what),
            StoreError::Backend(msg) => write!(f, "Store failure: {}", msg),
        }
    }
}

/// Errors returned by game operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate text is not a letter A-J followed by 1-10.
    MalformedCoordinate,
    /// A projected ship line leaves the grid.
    OutOfBounds,
    /// Number of coordinates differs from the ship size.
    SizeMismatch { expected: usize, actual: usize },
    /// Ship type or one of its cells is already placed for this owner.
    DuplicatePlacement,
    /// Automatic placement ran out of attempts for a ship.
    PlacementFailed { ship: ShipType, attempts: usize },
    /// The defender's position at this coordinate was already hit.
    AlreadyShot,
    /// Operation not allowed in the game's current status.
    InvalidPhase { status: GameStatus },
    /// Game start refused because this owner's fleet is incomplete.
    NotAcceptable { owner: Owner },
    /// Status change not permitted from the current status.
    InvalidTransition { from: GameStatus, to: GameStatus },
    /// Persistence failure, surfaced unchanged.
    Store(StoreError),
}

impl From<BitBoardError> for GameError {
    fn from(_: BitBoardError) -> Self {
        GameError::OutOfBounds
    }
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        GameError::Store(err)
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::MalformedCoordinate => {
                write!(f, "Coordinate must be a letter A-J followed by a number 1-10")
            }
            GameError::OutOfBounds => write!(f, "Ship placement is out of bounds"),
            GameError::SizeMismatch { expected, actual } => write!(
                f,
                "Ship positions are not equal to the size: expected {}, got {}",
                expected, actual
            ),
            GameError::DuplicatePlacement => write!(
                f,
                "A ship with the same type or position already exists for this player"
            ),
            GameError::PlacementFailed { ship, attempts } => write!(
                f,
                "Unable to place {} after {} attempts",
                ship.name(),
                attempts
            ),
            GameError::AlreadyShot => write!(f, "Position was already shot"),
            GameError::InvalidPhase { status } => {
                write!(f, "Operation not allowed while game is {}", status)
            }
            GameError::NotAcceptable { owner } => {
                write!(f, "{} has to add all the available ships", owner)
            }
            GameError::InvalidTransition { from, to } => {
                write!(f, "Game cannot move from {} to {}", from, to)
            }
            GameError::Store(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
