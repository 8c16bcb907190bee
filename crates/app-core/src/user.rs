//! Learner profile records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Enrolled learner
    #[default]
    Student,
    /// Course author
    Instructor,
    /// Platform administrator
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "student"),
            UserRole::Instructor => write!(f, "instructor"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// Authenticated user profile
///
/// `completed_courses` is expected to never exceed `enrolled_courses`; the
/// derived counters saturate rather than underflow if a backend disagrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable user identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Account role
    pub role: UserRole,
    /// Number of enrolled courses
    pub enrolled_courses: u32,
    /// Number of completed courses
    pub completed_courses: u32,
    /// Date the account was created
    pub joined_date: NaiveDate,
}

impl User {
    /// Courses enrolled but not yet completed
    pub fn in_progress_courses(&self) -> u32 {
        self.enrolled_courses.saturating_sub(self.completed_courses)
    }

    /// Whether the course counters are coherent
    pub fn is_consistent(&self) -> bool {
        self.completed_courses <= self.enrolled_courses
    }
}
