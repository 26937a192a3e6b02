use clap::Parser;
use client::network::Client;
use log::info;
use shared::OpponentKind;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Play against the server's computer opponent instead of waiting for
    /// another player
    #[arg(short = 'c', long)]
    vs_computer: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    println!("Welcome to Connect4!");
    info!("Connecting to: {}", args.server);

    let opponent = if args.vs_computer {
        OpponentKind::Computer
    } else {
        OpponentKind::Human
    };

    let mut client = Client::connect(&args.server, opponent).await?;
    client.run().await?;

    Ok(())
}
