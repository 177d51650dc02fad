#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use naval_engine::{
    init_logging, play_out, Game, HuntTargetStrategy, MatchReport, RemoteConfig, RemoteStrategy,
    Side, TargetingSkeleton, TargetingStrategy, TcpTransport, TransportService, BOARD_SIZE,
    MAX_BOARD_SIZE, SERVE_IDLE_TIMEOUT_SECS,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::net::TcpListener;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play a full game locally, both sides using the hunt/target strategy.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = BOARD_SIZE)]
        board_size: usize,
    },
    /// Serve the hunt/target strategy to remote players over TCP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:7878")]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible answers")]
        seed: Option<u64>,
        #[arg(
            long,
            default_value_t = SERVE_IDLE_TIMEOUT_SECS,
            help = "Drop a client idle for this many seconds"
        )]
        idle_timeout_secs: u64,
    },
    /// Play a game where the computer side asks a remote targeting service.
    Remote {
        #[arg(long, default_value = "127.0.0.1:7878")]
        connect: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
        #[arg(long, default_value_t = BOARD_SIZE)]
        board_size: usize,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>, offset: u64) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s.wrapping_add(offset)),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn new_game(board_size: usize, rng: &mut SmallRng) -> anyhow::Result<Game> {
    if board_size > MAX_BOARD_SIZE {
        anyhow::bail!("--board-size {} exceeds the maximum of {}", board_size, MAX_BOARD_SIZE);
    }
    let mut game = Game::new(board_size);
    game.place_remaining_randomly(rng)?;
    game.start(rng)?;
    Ok(game)
}

#[cfg(feature = "std")]
fn print_summary(game: &Game, report: &MatchReport) {
    println!("\nYour waters:\n{}", game.grid(Side::Human));
    println!("\nEnemy waters:\n{}", game.grid(Side::Computer));
    match report.winner {
        Side::Human => println!("\nVictory! All enemy ships sunk in {} shots.", report.human_shots),
        Side::Computer => println!(
            "\nDefeat. The opponent sank your fleet in {} shots.",
            report.computer_shots
        ),
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { seed, board_size } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = make_rng(seed, 0);
            let mut game = new_game(board_size, &mut rng)?;
            let mut human = HuntTargetStrategy::new(make_rng(seed, 1));
            let mut computer = HuntTargetStrategy::new(make_rng(seed, 2));
            let report = play_out(&mut game, &mut human, &mut computer).await?;
            print_summary(&game, &report);
        }
        Commands::Serve {
            bind,
            seed,
            idle_timeout_secs,
        } => {
            let config = RemoteConfig::serving(Duration::from_secs(idle_timeout_secs));
            let listener = TcpListener::bind(&bind).await?;
            println!("Targeting service listening on {}", listener.local_addr()?);
            let mut conn: u64 = 0;
            loop {
                let (stream, addr) = listener.accept().await?;
                log::info!("client connected from {}", addr);
                conn += 1;
                let rng = make_rng(seed, conn);
                tokio::spawn(async move {
                    let transport = TcpTransport::with_config(stream, config);
                    let mut skeleton = TargetingSkeleton::new(transport, rng);
                    if let Err(e) = skeleton.run().await {
                        log::warn!("session with {} ended with an error: {}", addr, e);
                    }
                });
            }
        }
        Commands::Remote {
            connect,
            seed,
            timeout_ms,
            board_size,
        } => {
            let config = RemoteConfig {
                timeout: Duration::from_millis(timeout_ms),
                ..RemoteConfig::default()
            };
            let mut rng = make_rng(seed, 0);
            let mut game = new_game(board_size, &mut rng)?;
            let mut human = HuntTargetStrategy::new(make_rng(seed, 1));
            let mut computer: Box<dyn TargetingStrategy> =
                match TcpTransport::connect_with_config(&connect, config).await {
                    Ok(tcp) => {
                        println!("Connected to targeting service at {}", connect);
                        Box::new(RemoteStrategy::new(
                            TransportService::new(tcp),
                            config,
                            make_rng(seed, 2),
                        ))
                    }
                    Err(e) => {
                        log::warn!("cannot reach {} ({}); using the local strategy", connect, e);
                        Box::new(HuntTargetStrategy::new(make_rng(seed, 2)))
                    }
                };
            let report = play_out(&mut game, &mut human, computer.as_mut()).await?;
            print_summary(&game, &report);
        }
    }
    Ok(())
}
