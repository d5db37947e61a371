use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use tokio::time::Duration;
use woodland_battleship::{IdentityKey, InMemoryTransport, MatchClient, MatchServer, Outcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let server = MatchServer::default();
    let mut c1 = connect(&server, "player1");
    let mut c2 = connect(&server, "player2");

    // Register in a fixed order so player1 is always the fox.
    c1.register().await?;
    c2.register().await?;

    let poll = Duration::from_millis(1);
    let f1 = async move {
        let mut rng = SmallRng::seed_from_u64(seed1);
        c1.play_out(&mut rng, poll).await
    };
    let f2 = async move {
        let mut rng = SmallRng::seed_from_u64(seed2);
        c2.play_out(&mut rng, poll).await
    };
    let (r1, r2) = tokio::try_join!(f1, f2)?;

    let winner = match (r1.outcome, r2.outcome) {
        (Outcome::Won, _) => Some(r1.registration.role.name()),
        (_, Outcome::Won) => Some(r2.registration.role.name()),
        _ => None,
    };

    let result = json!({
        "player1": {"animal": r1.registration.role.name(), "outcome": r1.outcome.to_string(), "shots": r1.shots},
        "player2": {"animal": r2.registration.role.name(), "outcome": r2.outcome.to_string(), "shots": r2.shots},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

fn connect(server: &MatchServer, name: &'static str) -> MatchClient<InMemoryTransport> {
    let (server_side, client_side) = InMemoryTransport::pair();
    let server = server.clone();
    tokio::spawn(async move { server.serve(server_side, IdentityKey::new(name)).await });
    MatchClient::new(client_side)
}
