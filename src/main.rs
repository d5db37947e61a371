use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::time::Duration;
use woodland_battleship::{init_logging, MatchClient, MatchServer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Host a match and wait for a fox and a badger to join.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, default_value_t = 300, help = "Seconds a connection may stay idle")]
        timeout: u64,
    },
    /// Join a match and play it out automatically.
    Play {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 500, help = "Milliseconds between status polls")]
        poll_ms: u64,
    },
    /// Ask the server to drop both players and start a new match.
    /// Must be run from a host already playing in the match.
    Reset {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, timeout } => {
            let listener = TcpListener::bind(&bind).await?;
            println!("Hosting a match at {}...", bind);
            MatchServer::default()
                .run(listener, Duration::from_secs(timeout))
                .await?;
        }
        Commands::Play {
            connect,
            seed,
            poll_ms,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (layout and targets will be reproducible)", s);
            }
            let mut rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let mut client = MatchClient::connect(&connect).await?;
            println!("Connected to {}", connect);
            let report = client
                .play_out(&mut rng, Duration::from_millis(poll_ms))
                .await?;
            println!(
                "Played as {} and fired {} shots: {}",
                report.registration.role, report.shots, report.outcome
            );
        }
        Commands::Reset { connect } => {
            let mut client = MatchClient::connect(&connect).await?;
            println!("{}", client.reset().await?);
        }
    }
    Ok(())
}
