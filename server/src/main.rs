use clap::Parser;
use log::info;
use server::listener::Listener;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Seconds a player may take per move before the session aborts (0 disables)
    #[arg(short = 't', long, default_value = "120")]
    move_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let move_timeout =
        (args.move_timeout_secs > 0).then(|| Duration::from_secs(args.move_timeout_secs));

    let address = format!("{}:{}", args.host, args.port);
    let listener = Listener::bind(&address, move_timeout).await?;

    tokio::select! {
        result = listener.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
