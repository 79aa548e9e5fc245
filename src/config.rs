use crate::ship::ShipType;

pub const BOARD_SIZE: u8 = 10;
pub const GRID_LETTERS: [char; BOARD_SIZE as usize] =
    ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];
pub const FLEET_SIZE: usize = 3;
pub const FLEET: [ShipType; FLEET_SIZE] =
    [ShipType::Battleship, ShipType::Destroyer1, ShipType::Destroyer2];

/// Total number of cells one complete fleet occupies.
pub const TOTAL_FLEET_CELLS: usize = 5 + 4 + 4;

/// Attempts allowed per ship before automatic placement gives up.
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 500;

/// Resamples allowed per counter-shot under [`CounterShotPolicy::RetryUntilFresh`].
pub const DEFAULT_COUNTER_SHOT_ATTEMPTS: usize = 100;

/// How the computer's counter-shot treats a cell it already hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CounterShotPolicy {
    /// Fire once; a repeat hit is swallowed and the turn is wasted.
    Once,
    /// Resample until a cell that was not already hit comes up.
    RetryUntilFresh { max_attempts: usize },
}

impl Default for CounterShotPolicy {
    fn default() -> Self {
        CounterShotPolicy::Once
    }
}

/// Runtime knobs of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub max_placement_attempts: usize,
    pub counter_shot: CounterShotPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            counter_shot: CounterShotPolicy::default(),
        }
    }
}

impl CounterShotPolicy {
    /// Parse `once` or `fresh` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("once") {
            Some(CounterShotPolicy::Once)
        } else if value.eq_ignore_ascii_case("fresh") {
            Some(CounterShotPolicy::RetryUntilFresh {
                max_attempts: DEFAULT_COUNTER_SHOT_ATTEMPTS,
            })
        } else {
            None
        }
    }
}

#[cfg(feature = "std")]
impl EngineConfig {
    /// Build a config from `BATTLESHIP_PLACEMENT_ATTEMPTS` and
    /// `BATTLESHIP_COUNTER_SHOT`, falling back to defaults for anything
    /// missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_placement_attempts = std::env::var("BATTLESHIP_PLACEMENT_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.max_placement_attempts);
        let counter_shot = std::env::var("BATTLESHIP_COUNTER_SHOT")
            .ok()
            .and_then(|v| CounterShotPolicy::parse(&v))
            .unwrap_or(defaults.counter_shot);
        Self {
            max_placement_attempts,
            counter_shot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fleet_cells_match_ship_sizes() {
        let total: usize = FLEET.iter().map(|s| s.size()).sum();
        assert_eq!(total, TOTAL_FLEET_CELLS);
    }

    #[test]
    fn counter_shot_policy_parses() {
        assert_eq!(CounterShotPolicy::parse("ONCE"), Some(CounterShotPolicy::Once));
        assert!(matches!(
            CounterShotPolicy::parse("fresh"),
            Some(CounterShotPolicy::RetryUntilFresh { .. })
        ));
        assert_eq!(CounterShotPolicy::parse("sometimes"), None);
    }
}
