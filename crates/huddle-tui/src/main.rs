//! Huddle TUI entry point.

use clap::Parser;
use huddle_client::backend::BackendClient;
use huddle_core::RoomCredentials;
use huddle_tui::{Runtime, TerminalDriver};

/// Huddle terminal client
#[derive(Parser, Debug)]
#[command(name = "huddle")]
#[command(about = "Terminal client for Huddle video rooms")]
#[command(version)]
struct Args {
    /// Room to join.
    #[arg(default_value = "demo")]
    room: String,

    /// Display name to join as.
    #[arg(short, long, default_value = "Guest")]
    name: String,

    /// Backend base URL (enables live room credentials and captioning)
    ///
    /// If not provided, runs in simulation mode with an in-process call.
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (credentials, backend) = match args.server {
        Some(addr) => {
            let backend = BackendClient::new(addr)?;
            let credentials = backend.fetch_room(&args.room, &args.name).await?;
            (credentials, Some(backend))
        },
        None => (sim_credentials(&args.room, &args.name), None),
    };

    let driver = TerminalDriver::new(backend)?;
    Ok(Runtime::new(driver, credentials).run().await?)
}

/// Canned credentials for simulation mode.
fn sim_credentials(room: &str, name: &str) -> RoomCredentials {
    let session_id = format!("sim-{room}-{:08x}", rand::random::<u32>());
    RoomCredentials::new("sim-key", session_id, "sim-token", name)
}
