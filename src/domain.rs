//! Records exchanged between the engine, its store and its callers.

use core::fmt;

use crate::board::Coordinate;
use crate::ship::{Owner, ShipType};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identity of a game.
    GameId
);
id_type!(ShipId);
id_type!(PositionId);

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum GameStatus {
    Initialized,
    InProgress,
    Completed,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Initialized => f.write_str("initialized"),
            GameStatus::InProgress => f.write_str("in_progress"),
            GameStatus::Completed => f.write_str("completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    pub id: GameId,
    pub status: GameStatus,
}

/// A placed ship. `destroyed` is derived from its positions by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    pub id: ShipId,
    pub game_id: GameId,
    pub ship_type: ShipType,
    pub owner: Owner,
    pub destroyed: bool,
}

/// One cell of a placed ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub id: PositionId,
    pub ship_id: ShipId,
    pub game_id: GameId,
    pub coordinate: Coordinate,
    pub shot: bool,
}

/// Outcome of a single resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// No defender position at the coordinate.
    Miss,
    /// A defender position was hit, possibly finishing its ship.
    Hit { ship_destroyed: bool },
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit { .. })
    }

    pub fn ship_destroyed(&self) -> bool {
        matches!(self, ShotOutcome::Hit { ship_destroyed: true })
    }
}
