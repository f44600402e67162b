//! Interactive CodeSync client.
//!
//! Joins a room on the relay, mirrors the shared buffer and lets the user edit
//! and run it from the terminal. A lost connection ends the session.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin codesync-client -- --room r1 --username alice
//! cargo run --bin codesync-client -- -r r1 -n bob --lang py
//! ```

use clap::Parser;

use codesync_client::{
    ClientConfig,
    executor::{DEFAULT_EXECUTION_URL, Language},
    run_client,
};
use codesync_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "codesync-client")]
#[command(about = "Collaborative code editing client for the CodeSync relay", long_about = None)]
struct Args {
    /// Room to join (same id means same room)
    #[arg(short = 'r', long)]
    room: String,

    /// Display name shown to other participants
    #[arg(short = 'n', long)]
    username: String,

    /// WebSocket relay URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Remote execution service URL
    #[arg(long, default_value = DEFAULT_EXECUTION_URL)]
    exec_url: String,

    /// Execution language (c, cpp, js, py, java, go, cs)
    #[arg(short = 'l', long, default_value = "c")]
    lang: Language,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ClientConfig {
        url: args.url,
        room_id: args.room,
        username: args.username,
        exec_url: args.exec_url,
        language: args.lang,
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
