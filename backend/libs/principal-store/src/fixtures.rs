//! Demo data for substitute mode
//!
//! Both services seed the same three named accounts under fixed ids so a
//! token minted by a substitute identity-service refers to a record that
//! exists in a substitute user-service.

use crate::Principal;
use chrono::{DateTime, Duration, Utc};

/// Stored hash for seeded profiles: not a PHC string, so no password verifies.
pub const DISABLED_PASSWORD_HASH: &str = "!";

const PROFILE_COUNT: u32 = 20;

#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub id: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
}

pub const DEMO_ACCOUNTS: [DemoAccount; 3] = [
    DemoAccount {
        id: "00000000-0000-0000-0000-000000000001",
        email: "admin@example.com",
        password: "admin123",
        name: "Admin User",
    },
    DemoAccount {
        id: "00000000-0000-0000-0000-000000000002",
        email: "user@example.com",
        password: "password123",
        name: "Regular User",
    },
    DemoAccount {
        id: "00000000-0000-0000-0000-000000000003",
        email: "test@example.com",
        password: "test123",
        name: "Test User",
    },
];

/// Fixed id for the n-th demo profile (1-based).
pub fn demo_id(n: u32) -> String {
    format!("00000000-0000-0000-0000-{n:012}")
}

/// Twenty profiles, the demo accounts first, each backdated by `n` days.
pub fn demo_profiles(now: DateTime<Utc>) -> Vec<Principal> {
    (1..=PROFILE_COUNT)
        .map(|n| {
            let (email, name) = match DEMO_ACCOUNTS.get(n as usize - 1) {
                Some(account) => (account.email.to_string(), account.name.to_string()),
                None => (format!("user{n}@example.com"), format!("User {n}")),
            };
            Principal {
                id: demo_id(n),
                email,
                password_hash: DISABLED_PASSWORD_HASH.to_string(),
                name,
                created_at: now - Duration::days(i64::from(n)),
                updated_at: now - Duration::days(i64::from(n / 2)),
            }
        })
        .collect()
}
