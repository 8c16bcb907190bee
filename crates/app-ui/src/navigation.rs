//! Navigation system for SkillForge
//!
//! This module provides the in-memory page navigation model:
//! - The closed set of logical pages
//! - The navigation state machine (a single current page, no history)
//! - The access gate that keeps signed-out visitors off the dashboard
//!
//! Navigation itself has no notion of permissions. The gate is a separate
//! policy applied by whoever renders the current page.

use serde::{Deserialize, Serialize};

// =============================================================================
// Pages
// =============================================================================

/// All logical pages in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Landing page
    #[default]
    Home,
    /// About the platform
    About,
    /// Course catalog
    Courses,
    /// Contact form
    Contact,
    /// Learner dashboard (requires a signed-in user)
    Dashboard,
    /// Sign-in screen
    Login,
}

impl Page {
    /// All pages
    pub fn all() -> [Page; 6] {
        [Page::Home, Page::About, Page::Courses, Page::Contact, Page::Dashboard, Page::Login]
    }

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Courses => "courses",
            Page::Contact => "contact",
            Page::Dashboard => "dashboard",
            Page::Login => "login",
        }
    }

    /// Whether the page may only be shown to a signed-in user
    pub fn requires_auth(&self) -> bool {
        matches!(self, Page::Dashboard)
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Page::Home),
            "about" => Ok(Page::About),
            "courses" => Ok(Page::Courses),
            "contact" => Ok(Page::Contact),
            "dashboard" => Ok(Page::Dashboard),
            "login" => Ok(Page::Login),
            _ => Err(format!("Unknown page: {}", s)),
        }
    }
}

// =============================================================================
// Header Links
// =============================================================================

/// A primary navigation link shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// Link label
    pub label: &'static str,
    /// Target page
    pub page: Page,
}

impl NavLink {
    /// Whether this link points at the current page
    pub fn is_active(&self, current: Page) -> bool {
        self.page == current
    }
}

/// Header navigation links in display order
pub const PRIMARY_LINKS: [NavLink; 4] = [
    NavLink { label: "Home", page: Page::Home },
    NavLink { label: "About", page: Page::About },
    NavLink { label: "Courses", page: Page::Courses },
    NavLink { label: "Contact", page: Page::Contact },
];

// =============================================================================
// Navigation State
// =============================================================================

/// Navigation state machine
///
/// Exactly one page is current. Transitions are direct overwrites: there is
/// no history stack, self-transitions are allowed and nothing is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    current: Page,
}

impl NavigationState {
    /// Create a new navigation state on the home page
    pub fn new() -> Self {
        Self::default()
    }

    /// The current page
    pub fn current_page(&self) -> Page {
        self.current
    }

    /// Make `target` the current page
    pub fn navigate_to(&mut self, target: Page) {
        if self.current != target {
            tracing::debug!(from = %self.current, to = %target, "navigate");
        }
        self.current = target;
    }
}

// =============================================================================
// Access Gate
// =============================================================================

/// Page that should actually be shown for a request
///
/// Pages that require a signed-in user resolve to [`Page::Login`] when no
/// user is signed in; every other request resolves to itself.
pub fn gate(requested: Page, is_authenticated: bool) -> Page {
    if requested.requires_auth() && !is_authenticated {
        Page::Login
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_page_is_home() {
        assert_eq!(NavigationState::new().current_page(), Page::Home);
    }

    #[test]
    fn test_last_navigation_wins() {
        let mut nav = NavigationState::new();
        let sequence = [Page::About, Page::Login, Page::Courses, Page::Courses, Page::Contact];

        for page in sequence {
            nav.navigate_to(page);
        }

        assert_eq!(nav.current_page(), Page::Contact);
    }

    #[test]
    fn test_self_transition_is_allowed() {
        let mut nav = NavigationState::new();
        nav.navigate_to(Page::Home);
        assert_eq!(nav.current_page(), Page::Home);
    }

    #[test]
    fn test_navigation_has_no_permissions() {
        let mut nav = NavigationState::new();
        nav.navigate_to(Page::Dashboard);
        assert_eq!(nav.current_page(), Page::Dashboard);
    }

    #[test]
    fn test_gate_redirects_signed_out_dashboard() {
        assert_eq!(gate(Page::Dashboard, false), Page::Login);
        assert_eq!(gate(Page::Dashboard, true), Page::Dashboard);
    }

    #[test]
    fn test_gate_passes_public_pages() {
        for page in Page::all().into_iter().filter(|p| !p.requires_auth()) {
            assert_eq!(gate(page, false), page);
            assert_eq!(gate(page, true), page);
        }
    }

    #[test]
    fn test_page_names_round_trip() {
        for page in Page::all() {
            assert_eq!(page.as_str().parse::<Page>().unwrap(), page);
        }
        assert_eq!("DASHBOARD".parse::<Page>().unwrap(), Page::Dashboard);
        assert!("settings".parse::<Page>().is_err());
    }

    #[test]
    fn test_page_serialization() {
        assert_eq!(serde_json::to_string(&Page::Courses).unwrap(), "\"courses\"");
        let page: Page = serde_json::from_str("\"login\"").unwrap();
        assert_eq!(page, Page::Login);
    }

    #[test]
    fn test_primary_links() {
        let labels: Vec<_> = PRIMARY_LINKS.iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["Home", "About", "Courses", "Contact"]);

        assert!(PRIMARY_LINKS[2].is_active(Page::Courses));
        assert!(!PRIMARY_LINKS.iter().any(|l| l.is_active(Page::Dashboard)));
    }
}
