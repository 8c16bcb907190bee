//! Application state management for SkillForge
//!
//! This crate holds the mutable state behind each screen: the session slot,
//! the contact form submission lifecycle, the catalog browser filters and the
//! dashboard view. Each state owner exposes its own mutators; nothing else
//! writes the underlying values.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod contact_form;
pub mod dashboard;
pub mod session;

pub use catalog::CatalogBrowser;
pub use contact_form::{ContactFormController, PendingSubmission, SubmitError};
pub use dashboard::{DashboardStats, DashboardTab, DashboardView};
pub use session::SessionState;
