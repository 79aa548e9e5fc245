use std::sync::Arc;

use fleet_command::{
    Coordinate, EngineConfig, GameError, GameId, GameService, GameStatus, MemoryStore, Owner,
    Store,
};

async fn nearly_won_game(service: &GameService<MemoryStore>) -> (GameId, Coordinate) {
    let game = service.create_game().await.unwrap().id;
    service.place_automatic(game, Owner::Human).await.unwrap();
    service.place_automatic(game, Owner::Computer).await.unwrap();
    service.start(game).await.unwrap();

    let store = service.store();
    let mut positions = store.positions_for(game, Owner::Computer).unwrap();
    let last = positions.pop().unwrap();
    for p in positions {
        store.mark_position_shot(p.id).await.unwrap();
    }
    (game, last.coordinate)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_winning_shots_complete_once() {
    let service = Arc::new(GameService::seeded(MemoryStore::new(), 5, EngineConfig::default()));
    let (game, last) = nearly_won_game(&service).await;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.shoot_at(game, last).await })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(report) => {
                assert!(report.computer_fleet_destroyed);
                assert_eq!(report.counter_shot, None);
                winners += 1;
            }
            Err(e) => assert_eq!(e, GameError::InvalidPhase { status: GameStatus::Completed }),
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(service.status(game).await.unwrap(), GameStatus::Completed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_repeat_shots_flip_once() {
    let service = Arc::new(GameService::seeded(MemoryStore::new(), 6, EngineConfig::default()));
    let game = service.create_game().await.unwrap().id;
    service.place_automatic(game, Owner::Human).await.unwrap();
    service.place_automatic(game, Owner::Computer).await.unwrap();
    service.start(game).await.unwrap();
    let target = service.store().positions_for(game, Owner::Computer).unwrap()[0].coordinate;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.shoot_at(game, target).await })
        })
        .collect();

    let mut hits = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(report) => {
                assert!(report.is_hit());
                hits += 1;
            }
            Err(GameError::AlreadyShot) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
    assert_eq!(hits, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_games_run_independently() {
    let service = Arc::new(GameService::seeded(MemoryStore::new(), 8, EngineConfig::default()));
    let mut games = Vec::new();
    for _ in 0..4 {
        games.push(nearly_won_game(&service).await);
    }

    let handles: Vec<_> = games
        .iter()
        .map(|&(game, last)| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.shoot_at(game, last).await })
        })
        .collect();
    for handle in handles {
        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.status, GameStatus::Completed);
    }
    for (game, _) in games {
        assert_eq!(
            service.store().count_destroyed_ships(game, Owner::Computer).await.unwrap(),
            3
        );
    }
}
