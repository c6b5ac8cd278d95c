//! Session context
//!
//! An explicit session value created at login and destroyed at logout.
//! Commands receive it read-only; nothing else in the client mutates it.

use serde::{Deserialize, Serialize};

/// Account role, gating which commands are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Ta,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Ta => "ta",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Active login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            role,
            started_at: chrono::Utc::now(),
        }
    }
}
