use naval_engine::{play_out, Game, GamePhase, HuntTargetStrategy, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut setup_rng = SmallRng::seed_from_u64(seed1 ^ seed2);
    let mut game = Game::default();
    game.place_remaining_randomly(&mut setup_rng)?;
    game.start(&mut setup_rng)?;

    let mut human = HuntTargetStrategy::seeded(seed1);
    let mut computer = HuntTargetStrategy::seeded(seed2);
    let report = play_out(&mut game, &mut human, &mut computer).await?;
    debug_assert_eq!(game.phase(), GamePhase::GameOver);

    let sunk = |side: Side| game.fleet(side).ships().iter().filter(|s| s.is_sunk()).count();
    let winner = match report.winner {
        Side::Human => "human",
        Side::Computer => "computer",
    };

    let result = json!({
        "human": {"shots": report.human_shots, "ships_sunk": sunk(Side::Computer)},
        "computer": {"shots": report.computer_shots, "ships_sunk": sunk(Side::Human)},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
