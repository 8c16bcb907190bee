//! System appearance detection
//!
//! The OS "prefers dark" signal is read once at startup. Detection failures
//! are treated as "no preference".

/// Source of the host's dark-appearance preference
pub trait SystemAppearance: Send + Sync {
    /// Whether the host reports a system-wide preference for dark appearance
    fn prefers_dark(&self) -> bool;
}

/// Reads the preference from the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct OsAppearance;

impl SystemAppearance for OsAppearance {
    fn prefers_dark(&self) -> bool {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => true,
            Ok(_) => false,
            Err(e) => {
                tracing::debug!("System appearance detection failed: {}", e);
                false
            }
        }
    }
}

/// A fixed answer, used for configuration overrides and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAppearance(pub bool);

impl FixedAppearance {
    /// Host prefers dark appearance
    pub const DARK: Self = Self(true);
    /// Host has no dark preference
    pub const LIGHT: Self = Self(false);
}

impl SystemAppearance for FixedAppearance {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}
