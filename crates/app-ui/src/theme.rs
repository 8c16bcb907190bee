//! Theme system for SkillForge
//!
//! Light/dark display preference with a fixed startup policy and persistence
//! under the `theme` key:
//!
//! 1. a non-empty persisted value wins (`"dark"` means dark, anything else
//!    light);
//! 2. otherwise the host's dark-appearance signal;
//! 3. otherwise light.
//!
//! The only mutator is [`ThemeState::toggle`]. Storage failures never
//! surface to callers: the state logs them and keeps working in memory for
//! the rest of the session.
//!
//! # Example
//!
//! ```rust
//! use app_platform::FixedAppearance;
//! use app_ui::theme::{ThemeName, ThemeState};
//! use std::sync::Arc;
//! use storage::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut theme = ThemeState::initialize(store, &FixedAppearance::DARK);
//! assert_eq!(theme.theme_name(), ThemeName::Dark);
//!
//! theme.toggle();
//! assert!(!theme.is_dark());
//! ```

use app_platform::SystemAppearance;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::PreferenceStore;

/// Storage key holding the theme preference
pub const THEME_KEY: &str = "theme";

// =============================================================================
// Theme Definition
// =============================================================================

/// Theme name enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl ThemeName {
    /// Get the color scheme name (also the persisted form)
    pub fn color_scheme(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(&self) -> ThemeName {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    /// Interpret a persisted value
    fn from_persisted(value: &str) -> ThemeName {
        if value == "dark" {
            ThemeName::Dark
        } else {
            ThemeName::Light
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Light => write!(f, "Light"),
            ThemeName::Dark => write!(f, "Dark"),
        }
    }
}

impl std::str::FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

// =============================================================================
// Theme State
// =============================================================================

/// Where the startup theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// A persisted preference
    Persisted,
    /// The host's dark-appearance signal
    System,
    /// Nothing persisted and no dark signal
    Default,
}

/// Theme provider state
pub struct ThemeState {
    theme_name: ThemeName,
    source: ThemeSource,
    store: Arc<dyn PreferenceStore>,
    persistent: bool,
}

impl ThemeState {
    /// Resolve the startup theme
    ///
    /// Reads the persisted preference once and, only if nothing is
    /// persisted, consults the host appearance signal.
    pub fn initialize(store: Arc<dyn PreferenceStore>, appearance: &dyn SystemAppearance) -> Self {
        let (persisted, persistent) = match store.get(THEME_KEY) {
            Ok(value) => (value.filter(|v| !v.is_empty()), true),
            Err(e) => {
                tracing::warn!("Failed to read theme preference, keeping theme in memory: {}", e);
                (None, false)
            }
        };

        let (theme_name, source) = match persisted {
            Some(value) => (ThemeName::from_persisted(&value), ThemeSource::Persisted),
            None if appearance.prefers_dark() => (ThemeName::Dark, ThemeSource::System),
            None => (ThemeName::Light, ThemeSource::Default),
        };

        tracing::debug!(theme = %theme_name, ?source, "theme initialized");

        Self { theme_name, source, store, persistent }
    }

    /// The current theme
    pub fn theme_name(&self) -> ThemeName {
        self.theme_name
    }

    /// Whether the current theme is dark
    pub fn is_dark(&self) -> bool {
        self.theme_name == ThemeName::Dark
    }

    /// Where the startup theme came from
    pub fn source(&self) -> ThemeSource {
        self.source
    }

    /// Whether changes are still being written to storage
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Flip light and dark, persisting the new value
    ///
    /// The new theme takes effect even if the write fails.
    pub fn toggle(&mut self) -> ThemeName {
        self.theme_name = self.theme_name.toggled();

        if self.persistent {
            if let Err(e) = self.store.set(THEME_KEY, self.theme_name.color_scheme()) {
                tracing::warn!("Failed to persist theme, keeping theme in memory: {}", e);
                self.persistent = false;
            }
        }

        tracing::info!(theme = %self.theme_name, "theme toggled");
        self.theme_name
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("theme_name", &self.theme_name)
            .field("source", &self.source)
            .field("persistent", &self.persistent)
            .finish()
    }
}
