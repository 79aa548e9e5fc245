#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::collections::BTreeSet;
#[cfg(feature = "std")]
use std::io::{self, Write};

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use fleet_command::{
    fleet_composition, init_logging, ui::render_board, Coordinate, CounterShotPolicy,
    EngineConfig, GameError, GameId, GameService, GameStatus, MemoryStore, Owner, ShotReport,
    DEFAULT_COUNTER_SHOT_ATTEMPTS,
};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::{Rng, SeedableRng};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum CounterShotMode {
    /// Fire once; repeating an earlier hit wastes the turn.
    Once,
    /// Redraw until a cell that was not already hit comes up.
    Fresh,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct GameOpts {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Attempts per ship before automatic placement gives up")]
    placement_attempts: Option<usize>,
    #[arg(long, value_enum, help = "How the computer handles repeating an earlier hit")]
    counter_shot: Option<CounterShotMode>,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer on this terminal.
    Play {
        #[command(flatten)]
        opts: GameOpts,
    },
    /// Let random shots play the human side and report the winner.
    Auto {
        #[command(flatten)]
        opts: GameOpts,
    },
}

#[cfg(feature = "std")]
impl GameOpts {
    fn config(&self) -> EngineConfig {
        let mut config = EngineConfig::from_env();
        if let Some(n) = self.placement_attempts {
            config.max_placement_attempts = n;
        }
        match self.counter_shot {
            Some(CounterShotMode::Once) => config.counter_shot = CounterShotPolicy::Once,
            Some(CounterShotMode::Fresh) => {
                config.counter_shot = CounterShotPolicy::RetryUntilFresh {
                    max_attempts: DEFAULT_COUNTER_SHOT_ATTEMPTS,
                }
            }
            None => {}
        }
        config
    }

    fn rng(&self, offset: u64) -> SmallRng {
        match self.seed {
            Some(s) => SmallRng::seed_from_u64(s.wrapping_add(offset)),
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        }
    }

    fn service(&self) -> GameService<MemoryStore> {
        if let Some(s) = self.seed {
            println!("Using fixed seed: {} (game will be reproducible)", s);
        }
        GameService::with_rng(MemoryStore::new(), self.rng(0), self.config())
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Play { opts } => play(opts.service()).await,
        Commands::Auto { opts } => {
            let shooter = opts.rng(1);
            auto(opts.service(), shooter).await
        }
    }
}

#[cfg(feature = "std")]
fn prompt(text: &str) -> anyhow::Result<String> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(anyhow::anyhow!("input closed"));
    }
    Ok(line.trim().to_string())
}

#[cfg(feature = "std")]
fn print_boards(service: &GameService<MemoryStore>, game: GameId, misses: &Misses) -> anyhow::Result<()> {
    let store = service.store();
    let mine = store.positions_for(game, Owner::Human)?;
    let theirs = store.positions_for(game, Owner::Computer)?;
    println!("\nYour fleet:\n{}", render_board(&mine, &misses.computer, true));
    println!("Enemy waters:\n{}", render_board(&theirs, &misses.human, false));
    Ok(())
}

/// Cells each side fired at without finding a ship.
#[cfg(feature = "std")]
#[derive(Default)]
struct Misses {
    human: BTreeSet<Coordinate>,
    computer: BTreeSet<Coordinate>,
}

#[cfg(feature = "std")]
impl Misses {
    fn record(&mut self, report: &ShotReport) {
        if !report.is_hit() {
            self.human.insert(report.coordinate);
        }
        if let Some(shot) = report.counter_shot {
            if shot.outcome().is_some_and(|o| !o.is_hit()) {
                self.computer.insert(shot.coordinate());
            }
        }
    }
}

#[cfg(feature = "std")]
async fn setup(service: &GameService<MemoryStore>, manual: bool) -> anyhow::Result<GameId> {
    let game = service.create_game().await?.id;
    if manual {
        for entry in fleet_composition() {
            loop {
                let line = prompt(&format!(
                    "Place {} ({} cells, e.g. A1 A2 A3 ...): ",
                    entry.ship_type, entry.size
                ))?;
                let cells: Vec<&str> = line.split_whitespace().collect();
                match service.place_manual(game, entry.ship_type, &cells).await {
                    Ok(_) => break,
                    Err(GameError::Store(e)) => return Err(e.into()),
                    Err(e) => println!("{}", e),
                }
            }
        }
    } else {
        service.place_automatic(game, Owner::Human).await?;
    }
    service.place_automatic(game, Owner::Computer).await?;
    service.start(game).await?;
    Ok(game)
}

#[cfg(feature = "std")]
async fn play(service: GameService<MemoryStore>) -> anyhow::Result<()> {
    let manual = prompt("Place your fleet by hand? [y/N]: ")?.eq_ignore_ascii_case("y");
    let game = setup(&service, manual).await?;
    let mut misses = Misses::default();

    loop {
        print_boards(&service, game, &misses)?;
        let target = prompt("Your shot: ")?;
        let report = match service.shoot(game, &target).await {
            Ok(report) => report,
            Err(GameError::Store(e)) => return Err(e.into()),
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        misses.record(&report);
        println!("{} {}", report.coordinate, report.message());
        if let Some(shot) = report.counter_shot {
            match shot.outcome() {
                Some(o) if o.ship_destroyed() => {
                    println!("Computer fired at {}: hit and destroyed your ship!", shot.coordinate())
                }
                Some(o) if o.is_hit() => println!("Computer fired at {}: hit!", shot.coordinate()),
                Some(_) => println!("Computer fired at {}: miss.", shot.coordinate()),
                None => println!("Computer fired at {} again and wasted its turn.", shot.coordinate()),
            }
        }
        if report.status == GameStatus::Completed {
            print_boards(&service, game, &misses)?;
            return Ok(());
        }
    }
}

#[cfg(feature = "std")]
async fn auto(service: GameService<MemoryStore>, mut shooter: SmallRng) -> anyhow::Result<()> {
    let game = setup(&service, false).await?;
    let mut misses = Misses::default();
    let mut untried: Vec<Coordinate> = Coordinate::all().collect();
    let mut rounds = 0;

    let last = loop {
        if untried.is_empty() {
            return Err(anyhow::anyhow!("ran out of cells before the game ended"));
        }
        let target = untried.swap_remove(shooter.random_range(0..untried.len()));
        let report = service.shoot_at(game, target).await?;
        rounds += 1;
        misses.record(&report);
        if report.status == GameStatus::Completed {
            break report;
        }
    };

    print_boards(&service, game, &misses)?;
    let winner = if last.computer_fleet_destroyed { "human" } else { "computer" };
    println!("Winner: {} after {} rounds", winner, rounds);
    Ok(())
}
