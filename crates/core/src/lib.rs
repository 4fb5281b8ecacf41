//! Core types for the scholarship recommendation backend
//!
//! This crate provides foundational types used across all other crates:
//! - Scholarship dataset record
//! - Student profile (transient request input)
//! - Error types

pub mod error;
pub mod profile;
pub mod record;

pub use error::{Error, Result};
pub use profile::StudentProfile;
pub use record::ScholarshipRecord;
