//! Core types and definitions for ARCSHOT.
//!
//! This crate defines the vocabulary shared by the targeting crate and its
//! callers: snapshots, launch constraints, solutions, projectile profiles,
//! events, constants, configuration and errors.
//! It contains no solver logic and no dependency on any game engine.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod profile;
pub mod types;

pub use config::TargetingConfig;
pub use error::{ConfigError, TargetingError};
