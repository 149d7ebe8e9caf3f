//! Interactive chat session: command loop plus background polling.
//!
//! Delivery is pull-based. A background task polls the server for messages
//! strictly newer than the highest timestamp seen so far; the server holds no
//! per-client state.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc};

use parlor_shared::wire::{MessageDto, MessageKind};

use crate::{api::ChatApi, error::ClientError};

const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Mutable session state shared between the command loop and the poller
struct SessionState {
    /// Room currently joined, if any
    room: Option<String>,
    /// Highest message timestamp seen; the next poll asks for strictly newer
    last_seen: String,
}

/// Run the interactive client session.
///
/// Resolves the chat server via the binder, registers the username, then
/// serves commands from stdin while polling for new messages.
pub async fn run_session(binder_url: &str, username: &str) -> Result<(), ClientError> {
    let api = ChatApi::discover(binder_url).await?;

    let ack = api.register_user(username).await?;
    println!("{}", ack.message);
    println!(
        "Commands: create <room>, join <room>, send <text>, sendto <user> <text>, list, users, exit"
    );

    // Seed the cursor from the server's clock. Seeding from the local clock
    // would skip messages whenever this host runs ahead of the server.
    let state = Arc::new(Mutex::new(SessionState {
        room: None,
        last_seen: ack.server_time,
    }));

    let poller = spawn_poller(api.clone(), username.to_string(), state.clone());

    // rustyline is synchronous; run it on its own thread and feed lines
    // through a channel.
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let readline_prompt = format!("{}> ", username);
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };
        loop {
            match rl.readline(&readline_prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        rl.add_history_entry(&line).ok();
                        if input_tx.send(line).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    break;
                }
            }
        }
    });

    while let Some(line) = input_rx.recv().await {
        if !handle_command(&api, username, &state, &line).await {
            break;
        }
    }

    poller.abort();
    // Best effort; the server may already know we are gone.
    if let Err(e) = api.unregister_user(username).await {
        tracing::warn!("Unregister failed: {}", e);
    }
    println!("Bye.");
    Ok(())
}

/// Handle one command line. Returns `false` when the session should end.
async fn handle_command(
    api: &ChatApi,
    username: &str,
    state: &Arc<Mutex<SessionState>>,
    line: &str,
) -> bool {
    let (command, rest) = match line.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    let outcome: Result<(), ClientError> = match command {
        "create" => api.create_room(rest).await.map(|ack| {
            println!("{}", ack.message);
        }),
        "join" => match api.join_room(username, rest).await {
            Ok(snapshot) => {
                let mut state = state.lock().await;
                state.room = Some(rest.to_string());
                if let Some(last) = snapshot.messages.last() {
                    state.last_seen = last.timestamp.clone();
                }
                println!("You have joined '{}'. Members: {}", rest, snapshot.users.join(", "));
                if !snapshot.messages.is_empty() {
                    println!("Recent messages:");
                    for msg in &snapshot.messages {
                        print_message(msg);
                    }
                }
                Ok(())
            }
            Err(e) => Err(e),
        },
        "send" | "sendto" => {
            let room = { state.lock().await.room.clone() };
            match room {
                None => {
                    println!("You are not in a room. Use: join <room>");
                    Ok(())
                }
                Some(room) => {
                    let (recipient, content) = if command == "sendto" {
                        match rest.split_once(' ') {
                            Some((user, text)) => (Some(user), text),
                            None => {
                                println!("Usage: sendto <user> <text>");
                                return true;
                            }
                        }
                    } else {
                        (None, rest)
                    };
                    api.send_message(username, &room, content, recipient)
                        .await
                        .map(|ack| {
                            println!("Sent at {}.", ack.timestamp);
                        })
                }
            }
        }
        "list" => api.list_rooms().await.map(|rooms| {
            println!("Available rooms: {}", rooms.join(", "));
        }),
        "users" => {
            let room = { state.lock().await.room.clone() };
            match room {
                None => {
                    println!("You are not in a room. Use: join <room>");
                    Ok(())
                }
                Some(room) => api.list_users(&room).await.map(|users| {
                    println!("Users in '{}': {}", room, users.join(", "));
                }),
            }
        }
        "exit" => return false,
        _ => {
            println!("Unknown command. Try: create, join, send, sendto, list, users, exit");
            Ok(())
        }
    };

    if let Err(e) = outcome {
        println!("Error: {}", e);
    }
    true
}

/// Spawn the polling task fetching messages newer than the last seen
/// timestamp every `POLL_INTERVAL`.
fn spawn_poller(
    api: ChatApi,
    username: String,
    state: Arc<Mutex<SessionState>>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        loop {
            ticker.tick().await;
            let (room, since) = {
                let state = state.lock().await;
                match &state.room {
                    Some(room) => (room.clone(), state.last_seen.clone()),
                    None => continue,
                }
            };

            match api.receive_new_messages(&username, &room, &since).await {
                Ok(messages) => {
                    let mut state = state.lock().await;
                    for msg in &messages {
                        if msg.timestamp > state.last_seen {
                            state.last_seen = msg.timestamp.clone();
                        }
                        if msg.origin != username {
                            println!();
                            print_message(msg);
                            redisplay_prompt(&username);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Polling failed: {}", e);
                }
            }
        }
    })
}

fn print_message(msg: &MessageDto) {
    match msg.kind {
        MessageKind::Broadcast => {
            println!("[{}] {}: {}", msg.timestamp, msg.origin, msg.content);
        }
        MessageKind::Unicast => {
            let to = msg.destination.as_deref().unwrap_or("?");
            println!(
                "[{}] {} -> {} (private): {}",
                msg.timestamp, msg.origin, to, msg.content
            );
        }
    }
}

fn redisplay_prompt(username: &str) {
    print!("{}> ", username);
    let _ = std::io::stdout().flush();
}
