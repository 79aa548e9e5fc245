#![cfg(feature = "std")]

//! Shot resolution against a defender's fleet and the computer's reply.

use log::{debug, warn};

use crate::board::Coordinate;
use crate::common::GameError;
use crate::config::CounterShotPolicy;
use crate::domain::{GameId, ShotOutcome};
use crate::ship::Owner;
use crate::store::Store;

/// What the computer's counter-shot amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CounterShot {
    /// The shot was resolved against the human fleet.
    Fired {
        coordinate: Coordinate,
        outcome: ShotOutcome,
    },
    /// Every sampled cell had already been hit; nothing changed.
    Wasted { coordinate: Coordinate },
}

impl CounterShot {
    pub fn coordinate(&self) -> Coordinate {
        match self {
            CounterShot::Fired { coordinate, .. } | CounterShot::Wasted { coordinate } => {
                *coordinate
            }
        }
    }

    /// Outcome when the shot landed; `None` for a wasted turn.
    pub fn outcome(&self) -> Option<ShotOutcome> {
        match self {
            CounterShot::Fired { outcome, .. } => Some(*outcome),
            CounterShot::Wasted { .. } => None,
        }
    }
}

/// Resolves shots through a [`Store`]. Callers must hold the game's lock.
pub struct CombatResolver<'a, S: Store + ?Sized> {
    store: &'a S,
    game: GameId,
}

impl<'a, S: Store + ?Sized> CombatResolver<'a, S> {
    pub fn new(store: &'a S, game: GameId) -> Self {
        Self { store, game }
    }

    /// Resolve a shot by `attacker` at `coordinate` against the other owner.
    ///
    /// A cell with no defender position is a miss and changes nothing. A
    /// position that was already hit fails with [`GameError::AlreadyShot`].
    pub async fn resolve(
        &self,
        coordinate: Coordinate,
        attacker: Owner,
    ) -> Result<ShotOutcome, GameError> {
        let defender = attacker.opponent();
        let position = match self.store.find_position(self.game, coordinate, defender).await? {
            None => {
                debug!("game {}: {} missed at {}", self.game, attacker, coordinate);
                return Ok(ShotOutcome::Miss);
            }
            Some(p) if p.shot => return Err(GameError::AlreadyShot),
            Some(p) => p,
        };

        self.store.mark_position_shot(position.id).await?;
        let ship_destroyed = self
            .store
            .list_positions(position.ship_id)
            .await?
            .iter()
            .all(|p| p.shot);
        debug!(
            "game {}: {} hit at {}{}",
            self.game,
            attacker,
            coordinate,
            if ship_destroyed { ", ship destroyed" } else { "" }
        );
        Ok(ShotOutcome::Hit { ship_destroyed })
    }

    /// Fire the computer's reply at a cell drawn from `sample`.
    ///
    /// Under [`CounterShotPolicy::Once`] a repeat hit is swallowed as a
    /// wasted turn. Under `RetryUntilFresh` new cells are drawn until one
    /// resolves or the attempts run out.
    pub async fn counter_shot<F>(
        &self,
        policy: CounterShotPolicy,
        mut sample: F,
    ) -> Result<CounterShot, GameError>
    where
        F: FnMut() -> Coordinate + Send,
    {
        let attempts = match policy {
            CounterShotPolicy::Once => 1,
            CounterShotPolicy::RetryUntilFresh { max_attempts } => max_attempts.max(1),
        };
        let mut coordinate = sample();
        for attempt in 1..=attempts {
            match self.resolve(coordinate, Owner::Computer).await {
                Ok(outcome) => return Ok(CounterShot::Fired { coordinate, outcome }),
                Err(GameError::AlreadyShot) => {
                    debug!(
                        "game {}: counter-shot at {} repeats a hit (attempt {})",
                        self.game, coordinate, attempt
                    );
                    if attempt < attempts {
                        coordinate = sample();
                    }
                }
                Err(e) => return Err(e),
            }
        }
        warn!("game {}: computer wasted its counter-shot at {}", self.game, coordinate);
        Ok(CounterShot::Wasted { coordinate })
    }
}
