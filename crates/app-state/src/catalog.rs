//! Course catalog browsing state
//!
//! Holds the three catalog filters and the most recent result list. Filter
//! setters only record the selection; [`CatalogBrowser::refresh`] runs the
//! query against the catalog service.

use app_core::courses::{
    CatalogError, CatalogQuery, CatalogService, CategoryFilter, Course, LevelFilter,
};
use std::sync::Arc;

/// Catalog browser
pub struct CatalogBrowser {
    service: Arc<dyn CatalogService>,
    query: CatalogQuery,
    results: Vec<Course>,
}

impl CatalogBrowser {
    /// Create a browser with no filters and no results loaded yet
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        Self { service, query: CatalogQuery::default(), results: Vec::new() }
    }

    /// Set the free-text search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
    }

    /// Select a category by its selector value (`All` clears the filter)
    pub fn select_category(&mut self, category: &str) {
        self.query.category = CategoryFilter::from_selection(category);
    }

    /// Select a level filter
    pub fn select_level(&mut self, level: LevelFilter) {
        self.query.level = level;
    }

    /// The active query
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Courses returned by the last refresh
    pub fn results(&self) -> &[Course] {
        &self.results
    }

    /// Whether the last refresh matched nothing
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Run the active query
    ///
    /// On failure the previous results are kept.
    pub async fn refresh(&mut self) -> Result<&[Course], CatalogError> {
        let courses = self.service.search(&self.query).await?;
        tracing::debug!(matches = courses.len(), search = %self.query.search, "catalog refreshed");
        self.results = courses;
        Ok(&self.results)
    }
}
