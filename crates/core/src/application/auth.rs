//! Authenticator
//!
//! Tokens are hex-encoded SHA-512 digests:
//! - admin: `sha512(YYYYMMDDHH + admin_salt)`, valid for the current local hour
//! - everyone else: `sha512(account + login + salt)`, static per account/login;
//!   a missing account is spelled `None`

use crate::application::settings::Settings;
use crate::domain::Envelope;
use crate::port::TimeProvider;
use sha2::{Digest, Sha512};
use std::sync::Arc;
use tracing::debug;

/// Stands in for a missing account in the regular token digest
pub const MISSING_ACCOUNT: &str = "None";

/// Token for a regular login
pub fn regular_token(account: Option<&str>, login: &str, salt: &str) -> String {
    sha512_hex(&format!("{}{}{}", account.unwrap_or(MISSING_ACCOUNT), login, salt))
}

/// Token for the admin identity during the given hour
pub fn admin_token(hour_stamp: &str, admin_salt: &str) -> String {
    sha512_hex(&format!("{}{}", hour_stamp, admin_salt))
}

fn sha512_hex(input: &str) -> String {
    format!("{:x}", Sha512::digest(input.as_bytes()))
}

/// Exact equality without an early exit on the first differing byte
fn tokens_match(expected: &str, supplied: &str) -> bool {
    let (a, b) = (expected.as_bytes(), supplied.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Checks envelope tokens against the configured secrets
pub struct Authenticator {
    settings: Arc<Settings>,
    time_provider: Arc<dyn TimeProvider>,
}

impl Authenticator {
    pub fn new(settings: Arc<Settings>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            settings,
            time_provider,
        }
    }

    pub fn is_admin(&self, login: &str) -> bool {
        login == self.settings.admin_login()
    }

    /// Token the server currently accepts for this account/login
    pub fn expected_token(&self, account: Option<&str>, login: &str) -> String {
        if self.is_admin(login) {
            admin_token(&self.time_provider.hour_stamp(), self.settings.admin_salt())
        } else {
            regular_token(account, login, self.settings.salt())
        }
    }

    /// Side-effect free; true iff the supplied token matches exactly
    pub fn authenticate(&self, envelope: &Envelope) -> bool {
        let expected = self.expected_token(envelope.account.as_deref(), &envelope.login);
        let ok = tokens_match(&expected, &envelope.token);
        if !ok {
            debug!(login = %envelope.login, admin = self.is_admin(&envelope.login), "Token mismatch");
        }
        ok
    }
}
