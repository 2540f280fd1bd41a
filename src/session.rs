//! Session registry
//!
//! A session groups the requests of one MCP client, starting at its
//! `initialize` handshake. The server assigns the identifier and the client
//! echoes it back in the `Mcp-Session-Id` header. Sessions end when the client
//! sends DELETE or when they sit idle past the configured timeout.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::protocol::ClientInfo;

/// Opaque session identifier (32 lowercase hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One client conversation. Everything but the activity stamp is fixed at
/// creation.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    protocol_version: String,
    client_info: Option<ClientInfo>,
    created_at: DateTime<Utc>,
    last_activity: Mutex<Instant>,
}

impl Session {
    fn new(protocol_version: String, client_info: Option<ClientInfo>) -> Self {
        Self {
            id: SessionId::generate(),
            protocol_version,
            client_info,
            created_at: Utc::now(),
            last_activity: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn protocol_version(&self) -> &str {
        &self.protocol_version
    }

    pub fn client_info(&self) -> Option<&ClientInfo> {
        self.client_info.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> Instant {
        *self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self, now: Instant) {
        let mut last = self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if now > *last {
            *last = now;
        }
    }

    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_activity()) > ttl
    }
}

/// In-memory store of open sessions.
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
    /// `None` disables idle expiry
    idle_timeout: Option<Duration>,
}

impl SessionManager {
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Build from the config value, where 0 means "never expire".
    pub fn from_timeout_secs(secs: u64) -> Self {
        Self::new((secs > 0).then(|| Duration::from_secs(secs)))
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout
    }

    /// Open a new session.
    pub async fn create(
        &self,
        protocol_version: &str,
        client_info: Option<ClientInfo>,
    ) -> Arc<Session> {
        let session = Arc::new(Session::new(protocol_version.to_string(), client_info));
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id().clone(), session.clone());
        tracing::info!(
            session_id = %session.id(),
            protocol_version,
            client = session.client_info().map(|c| c.name.as_str()).unwrap_or("unknown"),
            open = sessions.len(),
            "Session created"
        );
        session
    }

    /// Look up an open session and mark it active. A session that has
    /// already outlived its idle timeout is treated as gone even if the
    /// sweeper has not reached it yet.
    pub async fn get(&self, id: &SessionId) -> Option<Arc<Session>> {
        let now = Instant::now();
        let session = self.sessions.read().await.get(id).cloned()?;
        if let Some(ttl) = self.idle_timeout {
            if session.is_idle(now, ttl) {
                self.close(id).await;
                return None;
            }
        }
        session.touch(now);
        Some(session)
    }

    /// Close a session. Returns whether it existed.
    pub async fn close(&self, id: &SessionId) -> bool {
        let Some(session) = self.sessions.write().await.remove(id) else {
            return false;
        };
        tracing::info!(
            session_id = %id,
            lifetime_secs = (Utc::now() - session.created_at()).num_seconds(),
            "Session closed"
        );
        true
    }

    /// Drop every session idle for longer than the timeout as of `now`.
    /// Returns how many were removed.
    pub async fn sweep_expired(&self, now: Instant) -> usize {
        let Some(ttl) = self.idle_timeout else {
            return 0;
        };
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_idle(now, ttl));
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(removed, open = sessions.len(), "Expired idle sessions");
        }
        removed
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Run `sweep_expired` on a fixed interval until the task is aborted.
pub fn spawn_sweeper(
    manager: Arc<SessionManager>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            manager.sweep_expired(Instant::now()).await;
        }
    })
}
