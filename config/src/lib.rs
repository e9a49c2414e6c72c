//! # Config Crate
//!
//! Centralized tolerance constants for the revolved-part geometry pipeline.
//! Chord errors, subdivision caps, collider budgets and solver tolerances
//! are defined here so that every shape family tessellates and solves with
//! the same numbers.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{chord_error, GeometryConfig, MAX_CHORD_ERROR};
//!
//! // A 16-gon approximating a unit-diameter circle stays within tolerance.
//! assert!(chord_error(0.5, 16) <= MAX_CHORD_ERROR);
//!
//! // Callers that need different numbers build a validated snapshot.
//! let config = GeometryConfig::default();
//! assert_eq!(config.max_chord_error, MAX_CHORD_ERROR);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Overridable**: Empirical values (solver tolerance, rounding) live in
//!   [`constants::GeometryConfig`] so callers can replace them
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
