//! Core domain types
//!
//! This module contains the domain structures shared across the Cloudemy
//! client crates. The grading service owns the authoritative state; these
//! types only describe what the client observes and tracks locally.

pub mod run;
pub mod session;
pub mod submission;
pub mod version;
