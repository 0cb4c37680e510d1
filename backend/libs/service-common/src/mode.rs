//! Startup mode selection
//!
//! Two flags, read once: `USE_MOCK_SERVICES` and `BYPASS_AUTH`. Bypass is
//! only honoured together with substitutes, so it can never run against the
//! live store.

use std::env;
use std::fmt;
use tracing::warn;

/// `true`, `1` or `yes` (any case) turn a flag on.
pub fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMode {
    /// Postgres store, remote token validation
    Live,
    /// In-memory store, local token validation
    Substitute,
    /// In-memory store, gateway skipped
    SubstituteBypass,
}

impl ServiceMode {
    /// Read `USE_MOCK_SERVICES` and `BYPASS_AUTH` from the environment.
    pub fn from_env() -> Self {
        Self::from_flags(env_flag("USE_MOCK_SERVICES"), env_flag("BYPASS_AUTH"))
    }

    pub fn from_flags(use_substitutes: bool, bypass_auth: bool) -> Self {
        match (use_substitutes, bypass_auth) {
            (false, false) => ServiceMode::Live,
            (false, true) => {
                warn!("BYPASS_AUTH ignored: it requires USE_MOCK_SERVICES");
                ServiceMode::Live
            }
            (true, false) => ServiceMode::Substitute,
            (true, true) => {
                warn!("authentication bypass active; every request acts as the bypass principal");
                ServiceMode::SubstituteBypass
            }
        }
    }

    pub fn uses_substitutes(self) -> bool {
        !matches!(self, ServiceMode::Live)
    }

    pub fn bypasses_auth(self) -> bool {
        matches!(self, ServiceMode::SubstituteBypass)
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ServiceMode::Live => "live",
            ServiceMode::Substitute => "substitute",
            ServiceMode::SubstituteBypass => "substitute-bypass",
        })
    }
}
