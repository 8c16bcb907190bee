//! User interface state for SkillForge
//!
//! This crate provides the screen-level models the presentation layer binds
//! to: the page navigation state machine with its access gate, and the
//! light/dark theme preference.
//!
//! # Modules
//!
//! - [`navigation`] - Pages, header links, navigation state and gating
//! - [`theme`] - Theme preference with persistence and system fallback
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::{gate, NavigationState, Page};
//!
//! let mut nav = NavigationState::new();
//! nav.navigate_to(Page::Dashboard);
//!
//! // Signed-out visitors are shown the login screen instead
//! assert_eq!(gate(nav.current_page(), false), Page::Login);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod navigation;
pub mod theme;

// Re-export commonly used types
pub use navigation::{gate, NavLink, NavigationState, Page, PRIMARY_LINKS};
pub use theme::{ThemeName, ThemeSource, ThemeState, THEME_KEY};
