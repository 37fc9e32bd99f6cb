//! Demo admin session guard.
//!
//! This is a UI convenience gate, not a security control. The credential pair
//! is hardcoded, the persisted marker carries no signature or expiry, and a
//! marker found in storage is trusted as-is. Anyone with write access to the
//! session slot is "logged in". Do not harden this in place; put a real
//! identity provider in front of the admin operations instead.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{info, warn};

use crate::config::FolioConfig;
use crate::error::{SessionError, StoreError};
use crate::storage::SlotStorage;
use crate::storage::envelope;
use crate::types::AdminUser;

/// The single accepted login identifier.
pub const DEMO_EMAIL: &str = "admin@example.com";

/// The single accepted login secret.
pub const DEMO_PASSWORD: &str = "password";

fn demo_user() -> AdminUser {
    AdminUser {
        id: "1".to_string(),
        name: "Admin User".to_string(),
        email: DEMO_EMAIL.to_string(),
    }
}

pub struct SessionGuard {
    storage: Arc<dyn SlotStorage>,
    key: String,
    login_delay: Duration,
    user: RwLock<Option<AdminUser>>,
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("key", &self.key)
            .field("user", &self.current())
            .finish_non_exhaustive()
    }
}

impl SessionGuard {
    /// Build a guard and pick up any marker left by a previous process.
    ///
    /// An unparsable marker is removed. A storage read failure leaves the
    /// guard logged out.
    pub async fn restore(storage: Arc<dyn SlotStorage>, config: &FolioConfig) -> Self {
        let key = config.storage.session_key.clone();
        let user = match storage.get(&key).await {
            Ok(Some(blob)) => match envelope::decode_session(&blob) {
                Ok(decoded) => Some(decoded.into_inner()),
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding unreadable session marker");
                    if let Err(e) = storage.remove(&key).await {
                        warn!(key = %key, error = %e, "Failed to remove session marker");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "Cannot read session marker");
                None
            }
        };

        Self {
            storage,
            key,
            login_delay: config.latency.login(),
            user: RwLock::new(user),
        }
    }

    /// Check the demo credential pair and persist the session marker.
    pub async fn login(&self, email: &str, password: &str) -> crate::error::Result<AdminUser> {
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            info!(email, "Rejected login");
            return Err(SessionError::InvalidCredentials.into());
        }

        let user = demo_user();
        let blob = envelope::encode_session(&user).map_err(StoreError::Serialization)?;
        self.storage.set(&self.key, &blob).await?;
        *self.user.write().expect("session lock poisoned") = Some(user.clone());
        info!(email, "Admin logged in");
        Ok(user)
    }

    /// Clear the marker unconditionally.
    pub async fn logout(&self) -> crate::error::Result<()> {
        *self.user.write().expect("session lock poisoned") = None;
        self.storage.remove(&self.key).await?;
        info!("Admin logged out");
        Ok(())
    }

    pub fn current(&self) -> Option<AdminUser> {
        self.user.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// The logged-in identity, or `NotAuthenticated`.
    pub fn require(&self) -> crate::error::Result<AdminUser> {
        self.current()
            .ok_or_else(|| SessionError::NotAuthenticated.into())
    }
}
