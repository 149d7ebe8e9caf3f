//! Parlor chat server.
//!
//! Hosts rooms, users and message logs; registers its procedures with the
//! binder at startup so clients can discover it. Delivery is poll-based:
//! clients fetch new messages themselves, the server pushes nothing.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --port 9000 --binder-url http://127.0.0.1:5000
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use parlor_server::{
    binder::{HttpBinderClient, register_chat_procedures},
    reaper,
    store::{ChatStore, StoreConfig},
    ui::{self, state::AppState},
};
use parlor_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Chat server with binder-based discovery and poll-based delivery", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "9000")]
    port: u16,

    /// Host address clients should use to reach this server (as registered
    /// with the binder)
    #[arg(long)]
    advertise_host: Option<String>,

    /// Base URL of the binder
    #[arg(short = 'b', long, default_value = "http://127.0.0.1:5000")]
    binder_url: String,

    /// Seconds an empty room may stay idle before the reaper removes it
    #[arg(long, default_value = "300")]
    room_idle_timeout: i64,

    /// Seconds between reaper sweeps
    #[arg(long, default_value = "60")]
    reap_interval: u64,

    /// Maximum messages kept per room (bounds the join snapshot)
    #[arg(long, default_value = "50")]
    history_limit: usize,

    /// Reject a send when the sender is the only room member
    #[arg(long)]
    reject_solo_sends: bool,

    /// Attempts to reach the binder before giving up on startup
    #[arg(long, default_value = "5")]
    binder_attempts: u32,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = StoreConfig {
        history_limit: args.history_limit,
        room_idle_timeout_secs: args.room_idle_timeout,
        reject_solo_sends: args.reject_solo_sends,
    };
    let store = Arc::new(ChatStore::new(Arc::new(SystemClock), config));

    // Discovery first: if the binder never answers, fail startup loudly
    // instead of running undiscoverable.
    let binder = HttpBinderClient::new(args.binder_url.clone());
    let advertise_host = args.advertise_host.unwrap_or_else(|| args.host.clone());
    if let Err(e) = register_chat_procedures(
        &binder,
        &advertise_host,
        args.port,
        args.binder_attempts,
        Duration::from_secs(2),
    )
    .await
    {
        tracing::error!("Could not register with binder at {}: {}", args.binder_url, e);
        std::process::exit(1);
    }

    let reaper_handle = reaper::spawn(store.clone(), Duration::from_secs(args.reap_interval));

    let state = Arc::new(AppState { store });
    if let Err(e) = ui::server::run(args.host, args.port, state).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    reaper_handle.abort();
}
