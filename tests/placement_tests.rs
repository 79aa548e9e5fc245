use fleet_command::{
    fleet_composition, Coordinate, EngineConfig, GameError, GameService, GameStatus, MemoryStore, Owner,
    ShipType, Store,
};
use rand::RngCore;

/// Always yields zero: every sampled start is `A1`, every orientation the same.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
    fn next_u64(&mut self) -> u64 {
        0
    }
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0)
    }
}

fn service() -> GameService<MemoryStore> {
    GameService::seeded(MemoryStore::new(), 42, EngineConfig::default())
}

#[test]
fn test_fleet_composition() {
    let fleet: Vec<(ShipType, usize)> = service()
        .fleet_composition()
        .iter()
        .map(|e| (e.ship_type, e.size))
        .collect();
    assert_eq!(
        fleet,
        [
            (ShipType::Battleship, 5),
            (ShipType::Destroyer1, 4),
            (ShipType::Destroyer2, 4)
        ]
    );
    assert_eq!(fleet_composition().len(), 3);
}

#[tokio::test]
async fn test_battleship_then_duplicate() {
    let service = service();
    let game = service.create_game().await.unwrap().id;
    let cells = ["A1", "A2", "A3", "A4", "A5"];

    let ship = service
        .place_manual(game, ShipType::Battleship, &cells)
        .await
        .unwrap();
    assert_eq!(ship.owner, Owner::Human);
    assert!(!ship.destroyed);

    let again = service.place_manual(game, ShipType::Battleship, &["C1", "C2", "C3", "C4", "C5"]).await;
    assert_eq!(again.unwrap_err(), GameError::DuplicatePlacement);
    assert_eq!(
        service.store().count_placed_ship_types(game, Owner::Human).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_overlapping_cells_conflict() {
    let service = service();
    let game = service.create_game().await.unwrap().id;
    service
        .place_manual(game, ShipType::Battleship, &["A1", "A2", "A3", "A4", "A5"])
        .await
        .unwrap();
    let err = service
        .place_manual(game, ShipType::Destroyer1, &["A5", "B5", "C5", "D5"])
        .await
        .unwrap_err();
    assert_eq!(err, GameError::DuplicatePlacement);

    // The computer's grid is separate.
    service
        .place_ship(
            game,
            Owner::Computer,
            ShipType::Destroyer1,
            &["A5".parse().unwrap(), "B5".parse().unwrap(), "C5".parse().unwrap(), "D5".parse().unwrap()],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_size_mismatch_creates_nothing() {
    let service = service();
    let game = service.create_game().await.unwrap().id;
    let err = service
        .place_manual(game, ShipType::Destroyer2, &["B1", "B2", "B3"])
        .await
        .unwrap_err();
    assert_eq!(err, GameError::SizeMismatch { expected: 4, actual: 3 });
    assert!(service.store().positions_for(game, Owner::Human).unwrap().is_empty());
    assert_eq!(
        service.store().count_placed_ship_types(game, Owner::Human).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_malformed_cell_rejected() {
    let service = service();
    let game = service.create_game().await.unwrap().id;
    let err = service
        .place_manual(game, ShipType::Destroyer2, &["B1", "B2", "B3", "B11"])
        .await
        .unwrap_err();
    assert_eq!(err, GameError::MalformedCoordinate);
}

#[tokio::test]
async fn test_forced_collision_hits_retry_cap() {
    let config = EngineConfig {
        max_placement_attempts: 50,
        ..EngineConfig::default()
    };
    let service = GameService::with_rng(MemoryStore::new(), ZeroRng, config);
    let game = service.create_game().await.unwrap().id;

    let err = service
        .place_automatic(game, Owner::Computer)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GameError::PlacementFailed {
            ship: ShipType::Destroyer1,
            attempts: 50
        }
    );
    // The battleship placed before the failure stays placed.
    let ships = service.store().ships(game, Owner::Computer).unwrap();
    assert_eq!(ships.len(), 1);
    assert_eq!(ships[0].ship_type, ShipType::Battleship);
    assert!(!service.fleet_complete(game, Owner::Computer).await.unwrap());
}

#[tokio::test]
async fn test_automatic_twice_conflicts() {
    let service = service();
    let game = service.create_game().await.unwrap().id;
    service.place_automatic(game, Owner::Computer).await.unwrap();
    assert!(service.fleet_complete(game, Owner::Computer).await.unwrap());
    assert_eq!(
        service.place_automatic(game, Owner::Computer).await.unwrap_err(),
        GameError::DuplicatePlacement
    );
}

#[tokio::test]
async fn test_no_placement_after_start() {
    let service = service();
    let game = service.create_game().await.unwrap().id;
    service.place_automatic(game, Owner::Human).await.unwrap();
    service.place_automatic(game, Owner::Computer).await.unwrap();
    service.start(game).await.unwrap();

    let game2 = service.create_game().await.unwrap().id;
    assert_ne!(game, game2);
    assert_eq!(
        service.place_automatic(game, Owner::Human).await.unwrap_err(),
        GameError::InvalidPhase {
            status: GameStatus::InProgress
        }
    );
}

#[tokio::test]
async fn test_automatic_resamples_around_existing_ship() {
    let config = EngineConfig {
        max_placement_attempts: 50,
        ..EngineConfig::default()
    };
    let service = GameService::with_rng(MemoryStore::new(), ZeroRng, config);
    let game = service.create_game().await.unwrap().id;
    let cells: Vec<Coordinate> = ["A1", "B1", "C1", "D1"].iter().map(|c| c.parse().unwrap()).collect();
    service
        .place_ship(game, Owner::Computer, ShipType::Destroyer2, &cells)
        .await
        .unwrap();

    // Every sample starts at A1, which is already taken: the placer keeps
    // resampling instead of handing an overlapping ship to the store.
    assert_eq!(
        service.place_automatic(game, Owner::Computer).await.unwrap_err(),
        GameError::PlacementFailed {
            ship: ShipType::Battleship,
            attempts: 50
        }
    );
    assert_eq!(service.store().ships(game, Owner::Computer).unwrap().len(), 1);
}

#[tokio::test]
async fn test_automatic_fills_around_manual_ship() {
    for seed in 0..32 {
        let service = GameService::seeded(MemoryStore::new(), seed, EngineConfig::default());
        let game = service.create_game().await.unwrap().id;
        service
            .place_manual(game, ShipType::Destroyer2, &["E4", "E5", "E6", "E7"])
            .await
            .unwrap();

        // Battleship and Destroyer1 land clear of E4..E7; only the repeated
        // Destroyer2 type is refused.
        assert_eq!(
            service.place_automatic(game, Owner::Human).await.unwrap_err(),
            GameError::DuplicatePlacement
        );
        let positions = service.store().positions_for(game, Owner::Human).unwrap();
        assert_eq!(positions.len(), 13, "seed {}", seed);
        let mut cells: Vec<_> = positions.iter().map(|p| p.coordinate).collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 13, "seed {}", seed);
    }
}
