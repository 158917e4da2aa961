pub mod api;
pub mod cli;
pub mod config;
pub mod filter;
pub mod models;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use session::{Session, TokenStore};

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::session::SessionExpired;

/// Everything a command handler needs: configuration, the API client, and
/// the session context it reads and mutates. Built once per invocation.
pub struct AppContext {
    pub config: Config,
    pub api: ApiClient,
    pub session: Arc<Mutex<Session>>,
    /// Receiving half of the session-expired channel. The top-level
    /// application drains it after each command.
    pub expired_rx: mpsc::UnboundedReceiver<SessionExpired>,
    /// True when an explicit `--token` was given on the command line.
    pub token_override: bool,
}

impl AppContext {
    pub fn new(
        config: Config,
        api: ApiClient,
        expired_rx: mpsc::UnboundedReceiver<SessionExpired>,
        token_override: bool,
    ) -> Self {
        Self {
            config,
            api,
            session: Arc::new(Mutex::new(Session::new())),
            expired_rx,
            token_override,
        }
    }
}
