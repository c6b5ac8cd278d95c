//! Cloudemy Core
//!
//! Core types and abstractions for the Cloudemy grading client.
//!
//! This crate contains:
//! - Domain types: Core business entities (submission status, run outcomes,
//!   sessions, the local version store)
//! - DTOs: Data transfer objects matching the grading service's HTTP API

pub mod domain;
pub mod dto;
