#![cfg(feature = "std")]

//! In-process [`Store`] used by the CLI and the test suite.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::board::Coordinate;
use crate::common::StoreError;
use crate::domain::{Game, GameId, GameStatus, Position, PositionId, Ship, ShipId};
use crate::ship::{Owner, ShipType};
use crate::store::Store;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ShipRecord {
    id: ShipId,
    game_id: GameId,
    ship_type: ShipType,
    owner: Owner,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Tables {
    next_id: u64,
    games: BTreeMap<GameId, Game>,
    ships: BTreeMap<ShipId, ShipRecord>,
    positions: BTreeMap<PositionId, Position>,
}

impl Tables {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn game_mut(&mut self, id: GameId) -> Result<&mut Game, StoreError> {
        self.games
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("game {}", id)))
    }

    fn owner_of(&self, position: &Position) -> Option<Owner> {
        self.ships.get(&position.ship_id).map(|s| s.owner)
    }

    fn positions_of(&self, ship: ShipId) -> impl Iterator<Item = &Position> {
        self.positions.values().filter(move |p| p.ship_id == ship)
    }

    fn is_destroyed(&self, ship: ShipId) -> bool {
        let mut any = false;
        for p in self.positions_of(ship) {
            if !p.shot {
                return false;
            }
            any = true;
        }
        any
    }

    fn ship(&self, record: &ShipRecord) -> Ship {
        Ship {
            id: record.id,
            game_id: record.game_id,
            ship_type: record.ship_type,
            owner: record.owner,
            destroyed: self.is_destroyed(record.id),
        }
    }

    fn ships_of(&self, game: GameId, owner: Owner) -> impl Iterator<Item = &ShipRecord> {
        self.ships
            .values()
            .filter(move |s| s.game_id == game && s.owner == owner)
    }
}

/// Thread-safe in-memory tables with sequential ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }

    /// All ships `owner` has placed in `game`, in placement order.
    pub fn ships(&self, game: GameId, owner: Owner) -> Result<Vec<Ship>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.ships_of(game, owner).map(|r| tables.ship(r)).collect())
    }

    /// Every position `owner` holds in `game`.
    pub fn positions_for(&self, game: GameId, owner: Owner) -> Result<Vec<Position>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .positions
            .values()
            .filter(|p| p.game_id == game && tables.owner_of(p) == Some(owner))
            .copied()
            .collect())
    }

    /// Serialize every table so a session can be saved and restored.
    pub fn snapshot(&self) -> Result<Vec<u8>, StoreError> {
        let tables = self.tables()?;
        bincode::serialize(&*tables)
            .map_err(|e| StoreError::Backend(format!("snapshot failed: {}", e)))
    }

    /// Rebuild a store from [`MemoryStore::snapshot`] output.
    pub fn restore(bytes: &[u8]) -> Result<Self, StoreError> {
        let tables: Tables = bincode::deserialize(bytes)
            .map_err(|e| StoreError::Backend(format!("restore failed: {}", e)))?;
        Ok(Self {
            tables: Mutex::new(tables),
        })
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn create_game(&self) -> Result<Game, StoreError> {
        let mut tables = self.tables()?;
        let game = Game {
            id: GameId(tables.next_id()),
            status: GameStatus::Initialized,
        };
        tables.games.insert(game.id, game);
        Ok(game)
    }

    async fn game_status(&self, game: GameId) -> Result<GameStatus, StoreError> {
        let mut tables = self.tables()?;
        Ok(tables.game_mut(game)?.status)
    }

    async fn set_game_status(&self, game: GameId, status: GameStatus) -> Result<Game, StoreError> {
        let mut tables = self.tables()?;
        let record = tables.game_mut(game)?;
        record.status = status;
        Ok(*record)
    }

    async fn create_ship(
        &self,
        game: GameId,
        owner: Owner,
        ship_type: ShipType,
        coordinates: &[Coordinate],
    ) -> Result<Ship, StoreError> {
        let mut tables = self.tables()?;
        tables.game_mut(game)?;
        if tables.ships_of(game, owner).any(|s| s.ship_type == ship_type) {
            return Err(StoreError::Conflict(format!(
                "{} already placed for {} in game {}",
                ship_type, owner, game
            )));
        }
        let taken = tables.positions.values().find(|p| {
            p.game_id == game
                && coordinates.contains(&p.coordinate)
                && tables.owner_of(p) == Some(owner)
        });
        if let Some(p) = taken {
            return Err(StoreError::Conflict(format!(
                "{} already occupied for {} in game {}",
                p.coordinate, owner, game
            )));
        }

        let record = ShipRecord {
            id: ShipId(tables.next_id()),
            game_id: game,
            ship_type,
            owner,
        };
        tables.ships.insert(record.id, record);
        for &coordinate in coordinates {
            let id = PositionId(tables.next_id());
            tables.positions.insert(
                id,
                Position {
                    id,
                    ship_id: record.id,
                    game_id: game,
                    coordinate,
                    shot: false,
                },
            );
        }
        Ok(tables.ship(&record))
    }

    async fn find_position(
        &self,
        game: GameId,
        coordinate: Coordinate,
        owner: Owner,
    ) -> Result<Option<Position>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .positions
            .values()
            .find(|p| {
                p.game_id == game
                    && p.coordinate == coordinate
                    && tables.owner_of(p) == Some(owner)
            })
            .copied())
    }

    async fn mark_position_shot(&self, position: PositionId) -> Result<(), StoreError> {
        let mut tables = self.tables()?;
        let record = tables
            .positions
            .get_mut(&position)
            .ok_or_else(|| StoreError::NotFound(format!("position {}", position)))?;
        record.shot = true;
        Ok(())
    }

    async fn list_positions(&self, ship: ShipId) -> Result<Vec<Position>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.positions_of(ship).copied().collect())
    }

    async fn count_destroyed_ships(&self, game: GameId, owner: Owner) -> Result<usize, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .ships_of(game, owner)
            .filter(|s| tables.is_destroyed(s.id))
            .count())
    }

    async fn count_placed_ship_types(
        &self,
        game: GameId,
        owner: Owner,
    ) -> Result<usize, StoreError> {
        let tables = self.tables()?;
        let mut types: Vec<ShipType> = tables.ships_of(game, owner).map(|s| s.ship_type).collect();
        types.sort();
        types.dedup();
        Ok(types.len())
    }
}
