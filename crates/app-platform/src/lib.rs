//! Platform integration for SkillForge
//!
//! This crate exposes host environment signals consumed at startup, such as
//! the system-wide dark appearance preference.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod appearance;

pub use appearance::{FixedAppearance, OsAppearance, SystemAppearance};
