//! Parlor chat client.
//!
//! Resolves the chat server through the binder once, registers a username
//! and starts an interactive session. New messages arrive by polling; there
//! is no push channel.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin client -- --username alice
//! cargo run --bin client -- -u bob --binder-url http://127.0.0.1:5000
//! ```

use clap::Parser;

use parlor_client::{error::ClientError, session::run_session};
use parlor_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Polling chat client with binder-based discovery", long_about = None)]
struct Args {
    /// Username to register (must be unique on the chat server)
    #[arg(short = 'u', long)]
    username: String,

    /// Base URL of the binder
    #[arg(short = 'b', long, default_value = "http://127.0.0.1:5000")]
    binder_url: String,
}

#[tokio::main]
async fn main() {
    // Keep chat output readable; raise with RUST_LOG when debugging.
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    if let Err(e) = run_session(&args.binder_url, &args.username).await {
        match e {
            ClientError::DuplicateUsername(_) => {
                eprintln!("{}. Pick another username.", e);
            }
            other => eprintln!("Client error: {}", other),
        }
        std::process::exit(1);
    }
}
