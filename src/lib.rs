//! SkillForge application shell
//!
//! Composition root for the SkillForge learning platform front-end. It wires
//! the member crates together:
//!
//! - [`storage`] - durable and in-memory preference stores
//! - [`app_platform`] - host appearance signal
//! - [`app_core`] - domain records and collaborator services
//! - [`app_state`] - session, contact form, catalog and dashboard state
//! - [`app_ui`] - navigation, access gate and theme
//!
//! # Example
//!
//! ```rust
//! use skillforge::{AppConfig, AppContext, Message, Page};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! runtime.block_on(async {
//!     let mut ctx = AppContext::from_config(&AppConfig::default()).unwrap();
//!
//!     ctx.dispatch(Message::Navigate(Page::Dashboard)).await.unwrap();
//!     assert_eq!(ctx.effective_page(), Page::Login);
//!
//!     ctx.shutdown();
//! });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod logging;

pub use app::{AppContext, AppError, AppServices, Message};
pub use app_ui::navigation::Page;
pub use config::{AppConfig, BackendMode, ConfigError};
pub use logging::init_logging;
