//! TCP server for the remote-control adapter.
//!
//! Accepts any number of clients against one shared game session. The whole
//! `GameState` sits behind a single mutex and every request holds it for
//! exactly one operation + snapshot, so concurrent clients serialize cleanly
//! (the engine itself is synchronous and single-threaded by design).
//!
//! Gravity in serve mode is client-driven via the `tick` action; the server
//! schedules nothing itself.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::adapter::protocol::{apply_action, ActionRequest, ErrorMessage, StateMessage};
use crate::core::{GameConfig, GameState};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("BLOCKFALL_HOST").unwrap_or(defaults.host);
        let port = env::var("BLOCKFALL_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The session state shared between client connections.
pub type SharedGame = Arc<Mutex<GameState>>;

/// Build the shared session the server (and tests) hand out to clients.
pub fn shared_game(config: GameConfig, seed: u32) -> SharedGame {
    Arc::new(Mutex::new(GameState::with_config(config, seed)))
}

/// Bind and serve forever.
pub async fn run(config: &ServerConfig, game: SharedGame) -> Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;
    serve_on(listener, game).await
}

/// Serve on an already-bound listener (lets tests use an ephemeral port).
pub async fn serve_on(listener: TcpListener, game: SharedGame) -> Result<()> {
    loop {
        let (stream, _addr) = listener.accept().await?;
        let game = Arc::clone(&game);
        tokio::spawn(async move {
            // Client errors end that client's session only.
            let _ = handle_client(stream, game).await;
        });
    }
}

async fn handle_client(stream: TcpStream, game: SharedGame) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<ActionRequest>(&line) {
            Ok(request) => {
                let mut state = game.lock().await;
                apply_action(&mut state, request.action);
                serde_json::to_string(&StateMessage::from_snapshot(&state.snapshot()))?
            }
            Err(err) => serde_json::to_string(&ErrorMessage {
                error: format!("bad request: {err}"),
            })?,
        };

        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    Ok(())
}
