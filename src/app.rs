//! Application context
//!
//! [`AppContext`] owns every piece of application state (theme, session,
//! navigation, contact form, catalog browser, dashboard view) and is the
//! single place that applies user intents, expressed as [`Message`]s.
//!
//! Lifecycle: [`AppContext::from_config`] builds the context, the
//! presentation layer feeds it messages through [`AppContext::dispatch`]
//! and [`AppContext::shutdown`] flushes the preference store on exit.

use anyhow::Context as _;
use app_core::auth::{AuthError, Credentials, HttpIdentityService, IdentityService, MockIdentityService};
use app_core::client::ServiceConfig;
use app_core::contact::{ContactField, ContactService, HttpContactService, MockContactService};
use app_core::courses::{CatalogError, CatalogService, HttpCatalogService, LevelFilter, MockCatalogService};
use app_core::user::User;
use app_platform::{FixedAppearance, OsAppearance, SystemAppearance};
use app_state::contact_form::{ContactFormController, SubmitError};
use app_state::{CatalogBrowser, DashboardTab, DashboardView, SessionState};
use app_ui::navigation::{gate, NavigationState, Page};
use app_ui::theme::ThemeState;
use std::sync::Arc;
use std::time::Duration;
use storage::{KvConfig, KvStore, MemoryStore, PreferenceStore};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::{AppConfig, BackendMode, StorageConfig};

/// Errors surfaced by message dispatch
#[derive(Debug, Error)]
pub enum AppError {
    /// Sign-in failed
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Catalog query failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Contact form submission failed
    #[error("Contact error: {0}")]
    Contact(#[from] SubmitError),
}

/// Result type for dispatch
pub type Result<T> = std::result::Result<T, AppError>;

// =============================================================================
// Services
// =============================================================================

/// External collaborators the context is built from
#[derive(Clone)]
pub struct AppServices {
    /// Identity verification
    pub identity: Arc<dyn IdentityService>,
    /// Course catalog
    pub catalog: Arc<dyn CatalogService>,
    /// Contact message delivery
    pub contact: Arc<dyn ContactService>,
    /// Device-level preference storage
    pub store: Arc<dyn PreferenceStore>,
    /// Host dark-appearance signal
    pub appearance: Arc<dyn SystemAppearance>,
}

impl AppServices {
    /// Mock collaborators, volatile storage and a light host
    pub fn mock() -> Self {
        Self {
            identity: Arc::new(MockIdentityService::new()),
            catalog: Arc::new(MockCatalogService::new()),
            contact: Arc::new(MockContactService::new()),
            store: Arc::new(MemoryStore::new()),
            appearance: Arc::new(FixedAppearance::LIGHT),
        }
    }

    /// Replace the preference store
    pub fn with_store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.store = store;
        self
    }

    /// Replace the appearance signal
    pub fn with_appearance(mut self, appearance: Arc<dyn SystemAppearance>) -> Self {
        self.appearance = appearance;
        self
    }

    /// Build collaborators from configuration
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let (identity, catalog, contact): (
            Arc<dyn IdentityService>,
            Arc<dyn CatalogService>,
            Arc<dyn ContactService>,
        ) = match config.backend.mode {
            BackendMode::Mock => (
                Arc::new(MockIdentityService::new()),
                Arc::new(MockCatalogService::new()),
                Arc::new(MockContactService::with_delay(config.contact.submit_delay())),
            ),
            BackendMode::Http => {
                let base_url = config
                    .backend
                    .base_url
                    .clone()
                    .context("backend.base_url is required in http mode")?;
                let service = ServiceConfig::new(base_url).with_timeout(config.backend.timeout());

                (
                    Arc::new(
                        HttpIdentityService::new(service.clone())
                            .context("Failed to create identity client")?,
                    ),
                    Arc::new(
                        HttpCatalogService::new(service.clone())
                            .context("Failed to create catalog client")?,
                    ),
                    Arc::new(
                        HttpContactService::new(service).context("Failed to create contact client")?,
                    ),
                )
            }
        };

        let appearance: Arc<dyn SystemAppearance> = match config.appearance.prefer_dark {
            Some(prefer_dark) => Arc::new(FixedAppearance(prefer_dark)),
            None => Arc::new(OsAppearance),
        };

        Ok(Self {
            identity,
            catalog,
            contact,
            store: open_store(&config.storage),
            appearance,
        })
    }
}

/// Open the configured preference store
///
/// A store that cannot be opened is replaced by a volatile one.
fn open_store(config: &StorageConfig) -> Arc<dyn PreferenceStore> {
    let Some(path) = &config.path else {
        tracing::debug!("no storage path configured, preferences kept in memory");
        return Arc::new(MemoryStore::new());
    };

    match KvStore::new(KvConfig::new(path).cache_capacity(config.cache_capacity)) {
        Ok(store) => {
            tracing::info!(path = %path.display(), "preference store opened");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to open preference store at {}, keeping preferences in memory: {}",
                path.display(),
                e
            );
            Arc::new(MemoryStore::new())
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

/// User intents applied by [`AppContext::dispatch`]
#[derive(Debug, Clone)]
pub enum Message {
    /// Make a page current
    Navigate(Page),
    /// Navigate by external page name; unknown names land on home
    NavigateNamed(String),
    /// Flip light and dark
    ToggleTheme,
    /// Sign in, staying on the current page
    Login(Credentials),
    /// Sign in, then open the dashboard
    SignIn(Credentials),
    /// Clear the session only
    Logout,
    /// Clear the session, then go home
    SignOut,
    /// Switch the dashboard tab
    SelectDashboardTab(DashboardTab),
    /// Re-run the catalog query
    RefreshCatalog,
    /// Set the catalog search term and re-run the query
    SearchCourses(String),
    /// Set the catalog category and re-run the query
    SelectCategory(String),
    /// Set the catalog level and re-run the query
    SelectLevel(LevelFilter),
    /// Edit a contact form field
    UpdateContactField(ContactField, String),
    /// Validate the contact form and start delivering it in the background
    SubmitContact,
}

// =============================================================================
// Context
// =============================================================================

/// Explicitly owned application state
pub struct AppContext {
    store: Arc<dyn PreferenceStore>,
    theme: ThemeState,
    session: SessionState,
    navigation: NavigationState,
    contact_form: ContactFormController,
    contact_delivery: Option<JoinHandle<std::result::Result<(), SubmitError>>>,
    catalog: CatalogBrowser,
    dashboard: DashboardView,
}

impl AppContext {
    /// Build a context from collaborators
    ///
    /// The theme is resolved immediately; everything else starts empty on
    /// the home page.
    pub fn new(services: AppServices) -> Self {
        let theme = ThemeState::initialize(services.store.clone(), services.appearance.as_ref());

        Self {
            store: services.store,
            theme,
            session: SessionState::new(services.identity),
            navigation: NavigationState::new(),
            contact_form: ContactFormController::new(services.contact),
            contact_delivery: None,
            catalog: CatalogBrowser::new(services.catalog),
            dashboard: DashboardView::new(),
        }
    }

    /// Override how long the contact acknowledgment is shown
    pub fn with_contact_acknowledgement(mut self, window: Duration) -> Self {
        self.contact_form = self.contact_form.with_acknowledgement(window);
        self
    }

    /// Validate configuration and build a context from it
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        config.validate().context("Invalid configuration")?;
        let services = AppServices::from_config(config)?;

        let context =
            Self::new(services).with_contact_acknowledgement(config.contact.acknowledgement());

        tracing::info!(
            backend = ?config.backend.mode,
            theme = %context.theme.theme_name(),
            "application context ready"
        );
        Ok(context)
    }

    /// Apply a user intent
    ///
    /// `SubmitContact` returns as soon as the form is validated; delivery
    /// continues on a background task so other messages keep applying while
    /// the submit control is disabled.
    pub async fn dispatch(&mut self, message: Message) -> Result<()> {
        match message {
            Message::Navigate(page) => self.navigation.navigate_to(page),
            Message::NavigateNamed(name) => {
                let page = name.parse::<Page>().unwrap_or_else(|_| {
                    tracing::warn!(name = %name, "unknown page, showing home");
                    Page::Home
                });
                self.navigation.navigate_to(page);
            }
            Message::ToggleTheme => {
                self.theme.toggle();
            }
            Message::Login(credentials) => {
                self.session.login(&credentials).await?;
            }
            Message::SignIn(credentials) => {
                self.session.login(&credentials).await?;
                self.navigation.navigate_to(Page::Dashboard);
            }
            Message::Logout => self.session.logout(),
            Message::SignOut => {
                self.session.logout();
                self.navigation.navigate_to(Page::Home);
            }
            Message::SelectDashboardTab(tab) => self.dashboard.select_tab(tab),
            Message::RefreshCatalog => {
                self.catalog.refresh().await?;
            }
            Message::SearchCourses(term) => {
                self.catalog.set_search(term);
                self.catalog.refresh().await?;
            }
            Message::SelectCategory(category) => {
                self.catalog.select_category(&category);
                self.catalog.refresh().await?;
            }
            Message::SelectLevel(level) => {
                self.catalog.select_level(level);
                self.catalog.refresh().await?;
            }
            Message::UpdateContactField(field, value) => {
                self.contact_form.update_field(field, value)
            }
            Message::SubmitContact => {
                let pending = self.contact_form.begin_submit()?;
                self.contact_delivery = Some(tokio::spawn(pending.deliver()));
            }
        }
        Ok(())
    }

    /// Wait for the background contact delivery, if one was started
    ///
    /// Returns the delivery outcome; `Ok` when nothing was pending.
    pub async fn contact_delivered(&mut self) -> Result<()> {
        let Some(handle) = self.contact_delivery.take() else {
            return Ok(());
        };

        match handle.await {
            Ok(outcome) => outcome.map_err(AppError::from),
            Err(e) => {
                tracing::warn!("Contact delivery task ended abnormally: {}", e);
                Ok(())
            }
        }
    }

    /// The page to render
    ///
    /// Applies the dashboard gate. A signed-out request for a protected page
    /// is redirected, and the redirect is committed to navigation.
    pub fn effective_page(&mut self) -> Page {
        let requested = self.navigation.current_page();
        let page = gate(requested, self.session.is_authenticated());

        if page != requested {
            tracing::info!(requested = %requested, shown = %page, "redirecting signed-out visitor");
            self.navigation.navigate_to(page);
        }
        page
    }

    /// Flush durable state
    pub fn shutdown(&self) {
        if let Err(e) = self.store.flush() {
            tracing::warn!("Failed to flush preference store: {}", e);
        }
        tracing::info!("application context shut down");
    }

    /// Theme state
    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// Session state
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    /// Navigation state (raw, ungated)
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Contact form controller
    pub fn contact_form(&self) -> &ContactFormController {
        &self.contact_form
    }

    /// Catalog browser
    pub fn catalog(&self) -> &CatalogBrowser {
        &self.catalog
    }

    /// Dashboard view
    pub fn dashboard(&self) -> &DashboardView {
        &self.dashboard
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("theme", &self.theme)
            .field("session", &self.session)
            .field("navigation", &self.navigation)
            .finish_non_exhaustive()
    }
}
