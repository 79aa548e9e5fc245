#![cfg(feature = "std")]

//! Entry point an API layer calls: every game operation, serialized per game.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tokio::sync::{Mutex as GameLock, OwnedMutexGuard};

use crate::bitboard::Occupancy;
use crate::board::{parse_coordinate, Coordinate};
use crate::combat::{CombatResolver, CounterShot};
use crate::common::{GameError, StoreError};
use crate::config::{EngineConfig, FLEET, FLEET_SIZE};
use crate::domain::{Game, GameId, GameStatus, Ship, ShotOutcome};
use crate::game::{FleetLosses, FleetReadiness};
use crate::placement::{parse_manual, validate_manual, AutoPlacer};
use crate::ship::{fleet_composition, FleetEntry, Owner, ShipType};
use crate::store::Store;
use crate::win;

/// Combined result of a human shot and the computer's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ShotReport {
    pub coordinate: Coordinate,
    pub outcome: ShotOutcome,
    /// The human has destroyed the computer's whole fleet.
    pub computer_fleet_destroyed: bool,
    /// The computer has destroyed the human's whole fleet.
    pub human_fleet_destroyed: bool,
    /// `None` when the human shot ended the game.
    pub counter_shot: Option<CounterShot>,
    pub status: GameStatus,
}

impl ShotReport {
    pub fn is_hit(&self) -> bool {
        self.outcome.is_hit()
    }

    pub fn ship_destroyed(&self) -> bool {
        self.outcome.ship_destroyed()
    }

    /// Short text for the player describing the round.
    pub fn message(&self) -> &'static str {
        if self.computer_fleet_destroyed {
            "You won! All of the computer's ships have been destroyed."
        } else if self.human_fleet_destroyed {
            "You lost. The computer destroyed all of your ships."
        } else if self.ship_destroyed() {
            "Hit! You destroyed a ship."
        } else if self.is_hit() {
            "Hit!"
        } else {
            "Miss."
        }
    }
}

/// Game operations over a [`Store`], with an injected random source.
///
/// Placement, start and shooting hold a lock keyed by game id for their
/// whole critical section, so concurrent requests on one game run one at a
/// time while different games proceed in parallel.
pub struct GameService<S: Store, R: RngCore + Send = SmallRng> {
    store: S,
    rng: Mutex<R>,
    config: EngineConfig,
    locks: Mutex<HashMap<GameId, Arc<GameLock<()>>>>,
}

impl<S: Store> GameService<S, SmallRng> {
    /// Service with an entropy-seeded generator and the default config.
    pub fn new(store: S) -> Self {
        let mut seed_rng = rand::rng();
        Self::with_rng(store, SmallRng::from_rng(&mut seed_rng), EngineConfig::default())
    }

    /// Reproducible service: the same seed replays the same layouts and
    /// counter-shots.
    pub fn seeded(store: S, seed: u64, config: EngineConfig) -> Self {
        Self::with_rng(store, SmallRng::seed_from_u64(seed), config)
    }
}

impl<S: Store, R: RngCore + Send> GameService<S, R> {
    pub fn with_rng(store: S, rng: R, config: EngineConfig) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn fleet_composition(&self) -> &'static [FleetEntry] {
        fleet_composition()
    }

    // Never held across an await.
    fn rng(&self) -> MutexGuard<'_, R> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn lock(&self, game: GameId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(game).or_default().clone()
        };
        lock.lock_owned().await
    }

    pub async fn create_game(&self) -> Result<Game, GameError> {
        let game = self.store.create_game().await?;
        info!("game {} created", game.id);
        Ok(game)
    }

    pub async fn status(&self, game: GameId) -> Result<GameStatus, GameError> {
        Ok(self.store.game_status(game).await?)
    }

    /// Place one of the human's ships from coordinate text such as `"A1"`.
    pub async fn place_manual<C>(
        &self,
        game: GameId,
        ship_type: ShipType,
        coordinates: &[C],
    ) -> Result<Ship, GameError>
    where
        C: AsRef<str> + Sync,
    {
        let cells = parse_manual(ship_type, coordinates)?;
        self.place_ship(game, Owner::Human, ship_type, &cells).await
    }

    /// Place a ship for `owner` at exactly `cells`.
    pub async fn place_ship(
        &self,
        game: GameId,
        owner: Owner,
        ship_type: ShipType,
        cells: &[Coordinate],
    ) -> Result<Ship, GameError> {
        validate_manual(ship_type, cells)?;
        let _guard = self.lock(game).await;
        self.store.game_status(game).await?.ensure_placing()?;
        self.persist_ship(game, owner, ship_type, cells).await
    }

    /// Lay out `owner`'s whole fleet at random, clear of any cells the owner
    /// already holds. On failure the ships placed so far stay placed.
    pub async fn place_automatic(&self, game: GameId, owner: Owner) -> Result<Vec<Ship>, GameError> {
        let _guard = self.lock(game).await;
        self.store.game_status(game).await?.ensure_placing()?;

        let occupied = self.occupied_cells(game, owner).await?;
        let mut placer = AutoPlacer::with_occupied(occupied, self.config.max_placement_attempts);
        let mut ships = Vec::with_capacity(FLEET_SIZE);
        for ship_type in FLEET {
            let line = {
                let mut rng = self.rng();
                placer.place(&mut *rng, ship_type)
            };
            let line = line.map_err(|e| {
                warn!("game {}: automatic placement for {} failed: {}", game, owner, e);
                e
            })?;
            ships.push(self.persist_ship(game, owner, ship_type, &line).await?);
        }
        info!("game {}: {} fleet placed automatically", game, owner);
        Ok(ships)
    }

    /// Cells `owner` already holds in `game`.
    async fn occupied_cells(&self, game: GameId, owner: Owner) -> Result<Occupancy, GameError> {
        let mut occupied = Occupancy::new();
        for cell in Coordinate::all() {
            if self.store.find_position(game, cell, owner).await?.is_some() {
                occupied.insert(cell)?;
            }
        }
        Ok(occupied)
    }

    async fn persist_ship(
        &self,
        game: GameId,
        owner: Owner,
        ship_type: ShipType,
        cells: &[Coordinate],
    ) -> Result<Ship, GameError> {
        match self.store.create_ship(game, owner, ship_type, cells).await {
            Ok(ship) => Ok(ship),
            Err(StoreError::Conflict(why)) => {
                warn!("game {}: rejected {} for {}: {}", game, ship_type, owner, why);
                Err(GameError::DuplicatePlacement)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether `owner` has placed every ship type of the fleet.
    pub async fn fleet_complete(&self, game: GameId, owner: Owner) -> Result<bool, GameError> {
        let placed = self.store.count_placed_ship_types(game, owner).await?;
        Ok(placed == FLEET_SIZE)
    }

    /// Move the game from `initialized` to `in_progress`.
    pub async fn start(&self, game: GameId) -> Result<Game, GameError> {
        let _guard = self.lock(game).await;
        let status = self.store.game_status(game).await?;
        let readiness = FleetReadiness {
            human: self.fleet_complete(game, Owner::Human).await?,
            computer: self.fleet_complete(game, Owner::Computer).await?,
        };
        let next = status.start(readiness)?;
        let updated = self.store.set_game_status(game, next).await?;
        info!("game {} is {}", game, updated.status);
        Ok(updated)
    }

    /// Human shot from coordinate text, followed by the computer's reply.
    pub async fn shoot(&self, game: GameId, coordinate: &str) -> Result<ShotReport, GameError> {
        let coordinate = parse_coordinate(coordinate)?;
        self.shoot_at(game, coordinate).await
    }

    /// Human shot at `coordinate`. Unless it sinks the computer's last ship,
    /// the computer fires exactly once back before this returns.
    pub async fn shoot_at(&self, game: GameId, coordinate: Coordinate) -> Result<ShotReport, GameError> {
        let _guard = self.lock(game).await;
        let status = self.store.game_status(game).await?;
        status.ensure_shooting()?;

        let combat = CombatResolver::new(&self.store, game);
        let outcome = combat.resolve(coordinate, Owner::Human).await?;
        let mut losses = FleetLosses {
            human: false,
            computer: win::fleet_destroyed(&self.store, game, Owner::Computer).await?,
        };

        let mut counter_shot = None;
        if !losses.computer {
            let shot = combat
                .counter_shot(self.config.counter_shot, || Coordinate::random(&mut *self.rng()))
                .await?;
            losses.human = win::fleet_destroyed(&self.store, game, Owner::Human).await?;
            counter_shot = Some(shot);
        }

        let status = match status.after_shots(losses)? {
            Some(next) => {
                self.store.set_game_status(game, next).await?;
                info!(
                    "game {} {}: {} fleet destroyed",
                    game,
                    next,
                    if losses.computer { Owner::Computer } else { Owner::Human }
                );
                next
            }
            None => status,
        };

        Ok(ShotReport {
            coordinate,
            outcome,
            computer_fleet_destroyed: losses.computer,
            human_fleet_destroyed: losses.human,
            counter_shot,
            status,
        })
    }
}
