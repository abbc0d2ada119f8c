//! Read-only user profile provider.
//!
//! The engine only ever consumes two fields per user: bankroll and risk
//! aversion. Account management lives elsewhere; this module models the
//! user database as an injected read-only store loaded once at startup.

use crate::advice::RiskAversion;
use crate::errors::{ServiceError, ServiceResult};
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

/// The slice of a user record the advice engine consumes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Profile {
    pub username: String,
    pub bankroll: f64,
    pub risk: RiskAversion,
}

/// Anything that can resolve a username to a profile.
/// The service is generic over this seam so tests inject fixed profiles.
pub trait ProfileProvider: Send + Sync {
    fn profile(&self, username: &str) -> ServiceResult<Profile>;
}

/// Profile store backed by a flat JSON object keyed by user id.
/// Loaded wholesale at startup, immutable afterwards.
#[derive(Debug, Default)]
pub struct JsonProfileStore {
    users: HashMap<Uuid, Profile>,
}

impl JsonProfileStore {
    pub fn load(path: &Path) -> ServiceResult<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "user database missing, starting empty");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Data(format!("read {}: {e}", path.display())))?;

        // An empty database file is an empty store, not an error
        if raw.trim().is_empty() {
            tracing::warn!(path = %path.display(), "user database is empty");
            return Ok(Self::default());
        }

        let users: HashMap<Uuid, Profile> = serde_json::from_str(&raw)
            .map_err(|e| ServiceError::Data(format!("parse {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), users = users.len(), "user database loaded");
        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl ProfileProvider for JsonProfileStore {
    fn profile(&self, username: &str) -> ServiceResult<Profile> {
        self.users
            .values()
            .find(|p| p.username == username)
            .cloned()
            .ok_or_else(|| ServiceError::UnknownUser(username.to_string()))
    }
}
