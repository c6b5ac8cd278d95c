//! Data transfer objects for the grading service API
//!
//! These DTOs mirror the service's request and response bodies field for
//! field. Domain types carry the semantics; everything here is shaped by the
//! wire.

pub mod submission;
