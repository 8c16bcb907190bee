//! Course catalog
//!
//! Course records, the catalog query (free-text search plus category and
//! level filters) and the catalog collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::{ServiceClient, ServiceConfig};

/// Errors that can occur while querying the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or API error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            CatalogError::Decode(e.to_string())
        } else {
            CatalogError::Transport(e.to_string())
        }
    }
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Category names offered by the catalog filter, `All` first
pub const CATEGORIES: [&str; 5] = ["All", "AI/ML", "Development", "Data Science", "Mobile"];

/// Course difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseLevel {
    /// No prior knowledge required
    Beginner,
    /// Some experience expected
    Intermediate,
    /// Practitioner level
    Advanced,
}

impl CourseLevel {
    /// All levels in ascending difficulty
    pub fn all() -> [CourseLevel; 3] {
        [CourseLevel::Beginner, CourseLevel::Intermediate, CourseLevel::Advanced]
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            _ => Err(format!("Unknown course level: {}", s)),
        }
    }
}

/// A course offered in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier
    pub id: String,
    /// Title
    pub title: String,
    /// Short description
    pub description: String,
    /// Instructor name
    pub instructor: String,
    /// Human readable duration (e.g. "12 weeks")
    pub duration: String,
    /// Difficulty
    pub level: CourseLevel,
    /// Category name
    pub category: String,
    /// Price in whole dollars
    pub price: u32,
    /// Average rating out of 5
    pub rating: f32,
    /// Number of enrolled students
    pub students: u32,
    /// Cover image URL
    pub image: String,
}

/// Category filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category restriction
    #[default]
    All,
    /// Exact category name
    Named(String),
}

impl CategoryFilter {
    /// Build a filter from a selector value, where `All` means no restriction
    pub fn from_selection(value: &str) -> Self {
        if value == "All" {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value.to_string())
        }
    }

    /// Whether a course category passes the filter
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => name == category,
        }
    }

    fn as_param(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Named(name) => Some(name.as_str()),
        }
    }
}

/// Level filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    /// Any level
    #[default]
    All,
    /// Exactly this level
    Only(CourseLevel),
}

impl LevelFilter {
    /// Whether a course level passes the filter
    pub fn matches(&self, level: CourseLevel) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Only(only) => *only == level,
        }
    }
}

/// Catalog query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    /// Case-insensitive text matched against title and description
    pub search: String,
    /// Category restriction
    pub category: CategoryFilter,
    /// Level restriction
    pub level: LevelFilter,
}

impl CatalogQuery {
    /// Whether a course satisfies every part of the query
    pub fn matches(&self, course: &Course) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = course.title.to_lowercase().contains(&needle)
            || course.description.to_lowercase().contains(&needle);

        matches_search && self.category.matches(&course.category) && self.level.matches(course.level)
    }
}

/// Catalog capability
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Return every course matching the query, in catalog order
    async fn search(&self, query: &CatalogQuery) -> Result<Vec<Course>>;
}

/// Catalog served from a fixed in-memory list
#[derive(Debug, Clone)]
pub struct MockCatalogService {
    courses: Vec<Course>,
}

impl Default for MockCatalogService {
    fn default() -> Self {
        Self { courses: featured_courses() }
    }
}

impl MockCatalogService {
    /// Create a catalog with the featured courses
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with specific courses
    pub fn with_courses(courses: Vec<Course>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CatalogService for MockCatalogService {
    async fn search(&self, query: &CatalogQuery) -> Result<Vec<Course>> {
        Ok(self.courses.iter().filter(|c| query.matches(c)).cloned().collect())
    }
}

/// Catalog backed by `GET /courses`
#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    client: ServiceClient,
}

impl HttpCatalogService {
    /// Create a new HTTP catalog service
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self { client: ServiceClient::new(config)? })
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn search(&self, query: &CatalogQuery) -> Result<Vec<Course>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if !query.search.trim().is_empty() {
            params.push(("q", query.search.trim().to_string()));
        }
        if let Some(category) = query.category.as_param() {
            params.push(("category", category.to_string()));
        }
        if let LevelFilter::Only(level) = query.level {
            params.push(("level", level.to_string()));
        }

        let response = self
            .client
            .http()
            .get(self.client.url("/courses"))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Transport(format!(
                "unexpected status {}",
                response.status().as_u16()
            )));
        }

        Ok(response.json::<Vec<Course>>().await?)
    }
}

/// The four courses featured on the catalog page
pub fn featured_courses() -> Vec<Course> {
    vec![
        Course {
            id: "1".to_string(),
            title: "Complete AI & Machine Learning Bootcamp".to_string(),
            description: "Master artificial intelligence and machine learning from scratch with hands-on projects and real-world applications.".to_string(),
            instructor: "Dr. Sarah Chen".to_string(),
            duration: "12 weeks".to_string(),
            level: CourseLevel::Beginner,
            category: "AI/ML".to_string(),
            price: 299,
            rating: 4.9,
            students: 15420,
            image: "https://images.pexels.com/photos/8386440/pexels-photo-8386440.jpeg?auto=compress&cs=tinysrgb&w=400".to_string(),
        },
        Course {
            id: "2".to_string(),
            title: "Full-Stack Web Development".to_string(),
            description: "Build modern web applications using React, Node.js, and MongoDB. Learn industry best practices.".to_string(),
            instructor: "Mark Rodriguez".to_string(),
            duration: "16 weeks".to_string(),
            level: CourseLevel::Intermediate,
            category: "Development".to_string(),
            price: 349,
            rating: 4.8,
            students: 12890,
            image: "https://images.pexels.com/photos/4164418/pexels-photo-4164418.jpeg?auto=compress&cs=tinysrgb&w=400".to_string(),
        },
        Course {
            id: "3".to_string(),
            title: "Data Science with Python".to_string(),
            description: "Analyze data, create visualizations, and build predictive models using Python and its powerful libraries.".to_string(),
            instructor: "Prof. Emily Watson".to_string(),
            duration: "10 weeks".to_string(),
            level: CourseLevel::Beginner,
            category: "Data Science".to_string(),
            price: 279,
            rating: 4.7,
            students: 9650,
            image: "https://images.pexels.com/photos/6802042/pexels-photo-6802042.jpeg?auto=compress&cs=tinysrgb&w=400".to_string(),
        },
        Course {
            id: "4".to_string(),
            title: "Mobile App Development with React Native".to_string(),
            description: "Create cross-platform mobile applications for iOS and Android using React Native.".to_string(),
            instructor: "Alex Thompson".to_string(),
            duration: "14 weeks".to_string(),
            level: CourseLevel::Intermediate,
            category: "Mobile".to_string(),
            price: 329,
            rating: 4.6,
            students: 7230,
            image: "https://images.pexels.com/photos/147413/twitter-facebook-together-exchange-of-information-147413.jpeg?auto=compress&cs=tinysrgb&w=400".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ids(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|c| c.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_empty_query_returns_everything() {
        let catalog = MockCatalogService::new();
        let results = catalog.search(&CatalogQuery::default()).await.unwrap();
        assert_eq!(ids(&results), vec!["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_title_and_description() {
        let catalog = MockCatalogService::new();

        let by_title = CatalogQuery { search: "PYTHON".to_string(), ..Default::default() };
        assert_eq!(ids(&catalog.search(&by_title).await.unwrap()), vec!["3"]);

        let by_description = CatalogQuery { search: "mongodb".to_string(), ..Default::default() };
        assert_eq!(ids(&catalog.search(&by_description).await.unwrap()), vec!["2"]);
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let catalog = MockCatalogService::new();

        let query = CatalogQuery {
            search: String::new(),
            category: CategoryFilter::All,
            level: LevelFilter::Only(CourseLevel::Intermediate),
        };
        assert_eq!(ids(&catalog.search(&query).await.unwrap()), vec!["2", "4"]);

        let query = CatalogQuery {
            search: String::new(),
            category: CategoryFilter::from_selection("Mobile"),
            level: LevelFilter::Only(CourseLevel::Beginner),
        };
        assert!(catalog.search(&query).await.unwrap().is_empty());
    }

    #[test]
    fn test_category_selection() {
        assert_eq!(CategoryFilter::from_selection("All"), CategoryFilter::All);
        assert!(CategoryFilter::from_selection("AI/ML").matches("AI/ML"));
        assert!(!CategoryFilter::from_selection("AI/ML").matches("Mobile"));
        assert_eq!(CATEGORIES[0], "All");
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("beginner".parse::<CourseLevel>().unwrap(), CourseLevel::Beginner);
        assert_eq!("Advanced".parse::<CourseLevel>().unwrap(), CourseLevel::Advanced);
        assert!("expert".parse::<CourseLevel>().is_err());
    }

    #[tokio::test]
    async fn test_http_catalog_passes_filters() {
        let mock_server = MockServer::start().await;
        let matching: Vec<Course> = featured_courses().into_iter().take(1).collect();

        Mock::given(method("GET"))
            .and(path("/courses"))
            .and(query_param("q", "machine"))
            .and(query_param("level", "Beginner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&matching))
            .mount(&mock_server)
            .await;

        let catalog = HttpCatalogService::new(ServiceConfig::new(mock_server.uri())).unwrap();
        let query = CatalogQuery {
            search: "machine".to_string(),
            category: CategoryFilter::All,
            level: LevelFilter::Only(CourseLevel::Beginner),
        };

        let results = catalog.search(&query).await.unwrap();
        assert_eq!(ids(&results), vec!["1"]);
    }

    #[tokio::test]
    async fn test_http_catalog_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/courses"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let catalog = HttpCatalogService::new(ServiceConfig::new(mock_server.uri())).unwrap();
        let err = catalog.search(&CatalogQuery::default()).await.unwrap_err();

        assert!(matches!(err, CatalogError::Transport(_)));
    }
}
