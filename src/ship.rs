//! Fleet composition and ship ownership.

use core::fmt;

use crate::config::FLEET;

/// The three ship types every fleet holds exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipType {
    Battleship,
    Destroyer1,
    Destroyer2,
}

impl ShipType {
    /// Number of cells the ship occupies.
    pub const fn size(&self) -> usize {
        match self {
            ShipType::Battleship => 5,
            ShipType::Destroyer1 | ShipType::Destroyer2 => 4,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            ShipType::Battleship => "Battleship",
            ShipType::Destroyer1 => "Destroyer1",
            ShipType::Destroyer2 => "Destroyer2",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the fleet composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct FleetEntry {
    pub ship_type: ShipType,
    pub size: usize,
}

const COMPOSITION: [FleetEntry; FLEET.len()] = [
    FleetEntry { ship_type: FLEET[0], size: FLEET[0].size() },
    FleetEntry { ship_type: FLEET[1], size: FLEET[1].size() },
    FleetEntry { ship_type: FLEET[2], size: FLEET[2].size() },
];

/// The constant `{type, size}` list shared by both owners.
pub fn fleet_composition() -> &'static [FleetEntry] {
    &COMPOSITION
}

/// Side a ship belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Owner {
    Human,
    Computer,
}

impl Owner {
    /// The side being shot at when `self` attacks.
    pub fn opponent(&self) -> Owner {
        match self {
            Owner::Human => Owner::Computer,
            Owner::Computer => Owner::Human,
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Human => f.write_str("Player"),
            Owner::Computer => f.write_str("Computer"),
        }
    }
}
