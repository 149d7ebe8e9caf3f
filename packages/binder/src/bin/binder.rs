//! Binder service for the Parlor chat platform.
//!
//! Chat servers register their procedure names here at startup; clients
//! resolve a procedure name once to discover a chat server's address.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin binder
//! cargo run --bin binder -- --host 0.0.0.0 --port 5000
//! ```

use clap::Parser;

use parlor_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "binder")]
#[command(about = "Procedure name registry for service discovery", long_about = None)]
struct Args {
    /// Host address to bind the binder to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the binder to
    #[arg(short = 'p', long, default_value = "5000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = parlor_binder::server::run(args.host, args.port).await {
        tracing::error!("Binder error: {}", e);
        std::process::exit(1);
    }
}
