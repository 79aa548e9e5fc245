#![cfg(feature = "std")]

use crate::board::Coordinate;
use crate::common::StoreError;
use crate::domain::{Game, GameId, GameStatus, Position, PositionId, Ship, ShipId};
use crate::ship::{Owner, ShipType};

/// Persistence collaborator. The engine only ever talks to storage through
/// these operations; implementations may block or fail independently.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// New game in `initialized` status.
    async fn create_game(&self) -> Result<Game, StoreError>;

    async fn game_status(&self, game: GameId) -> Result<GameStatus, StoreError>;

    async fn set_game_status(&self, game: GameId, status: GameStatus) -> Result<Game, StoreError>;

    /// Persist a ship with one position per coordinate. Returns
    /// `StoreError::Conflict` if `(game, owner, ship_type)` exists or a
    /// coordinate is already taken by the same owner.
    async fn create_ship(
        &self,
        game: GameId,
        owner: Owner,
        ship_type: ShipType,
        coordinates: &[Coordinate],
    ) -> Result<Ship, StoreError>;

    async fn find_position(
        &self,
        game: GameId,
        coordinate: Coordinate,
        owner: Owner,
    ) -> Result<Option<Position>, StoreError>;

    async fn mark_position_shot(&self, position: PositionId) -> Result<(), StoreError>;

    async fn list_positions(&self, ship: ShipId) -> Result<Vec<Position>, StoreError>;

    async fn count_destroyed_ships(&self, game: GameId, owner: Owner) -> Result<usize, StoreError>;

    async fn count_placed_ship_types(&self, game: GameId, owner: Owner)
        -> Result<usize, StoreError>;
}
