//! Learner dashboard view state

use app_core::user::User;
use serde::{Deserialize, Serialize};

/// Study hours shown on the dashboard (not tracked yet)
pub const STUDY_HOURS: u32 = 156;

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    /// Stats and recent activity
    #[default]
    Overview,
    /// Enrolled courses
    Courses,
    /// Upcoming sessions
    Schedule,
    /// Learning goals
    Goals,
}

impl DashboardTab {
    /// All tabs in display order
    pub fn all() -> [DashboardTab; 4] {
        [DashboardTab::Overview, DashboardTab::Courses, DashboardTab::Schedule, DashboardTab::Goals]
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Courses => "My Courses",
            DashboardTab::Schedule => "Schedule",
            DashboardTab::Goals => "Goals",
        }
    }
}

/// Headline numbers for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Enrolled courses
    pub enrolled: u32,
    /// Completed courses
    pub completed: u32,
    /// Enrolled but not completed
    pub in_progress: u32,
    /// Total study hours
    pub study_hours: u32,
}

impl DashboardStats {
    /// Derive the stats for a user
    pub fn for_user(user: &User) -> Self {
        Self {
            enrolled: user.enrolled_courses,
            completed: user.completed_courses,
            in_progress: user.in_progress_courses(),
            study_hours: STUDY_HOURS,
        }
    }
}

/// Progress on a recently opened course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseProgress {
    /// Course name
    pub name: String,
    /// Percent complete (0-100)
    pub progress: u8,
    /// Title of the next lesson
    pub next_lesson: String,
}

/// A learner achievement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Achievement title
    pub title: String,
    /// Date earned (ISO-8601)
    pub date: String,
    /// Kind of achievement (milestone, streak, performance)
    pub kind: String,
}

/// Dashboard view state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardView {
    active_tab: DashboardTab,
}

impl DashboardView {
    /// Create a view on the overview tab
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected tab
    pub fn active_tab(&self) -> DashboardTab {
        self.active_tab
    }

    /// Select a tab
    pub fn select_tab(&mut self, tab: DashboardTab) {
        self.active_tab = tab;
    }

    /// Recently opened courses
    pub fn recent_courses(&self) -> Vec<CourseProgress> {
        [
            ("Advanced Machine Learning", 75, "Neural Networks Fundamentals"),
            ("React Development", 90, "State Management with Redux"),
            ("Python for Data Science", 45, "Data Visualization with Matplotlib"),
        ]
        .into_iter()
        .map(|(name, progress, next)| CourseProgress {
            name: name.to_string(),
            progress,
            next_lesson: next.to_string(),
        })
        .collect()
    }

    /// Achievements earned so far
    pub fn achievements(&self) -> Vec<Achievement> {
        [
            ("First Course Completed", "2024-02-15", "milestone"),
            ("Week Streak", "2024-03-01", "streak"),
            ("Top 10% Performer", "2024-03-10", "performance"),
        ]
        .into_iter()
        .map(|(title, date, kind)| Achievement {
            title: title.to_string(),
            date: date.to_string(),
            kind: kind.to_string(),
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::auth::MockIdentityService;

    #[test]
    fn test_stats_for_user() {
        let user = MockIdentityService::demo_user();
        let stats = DashboardStats::for_user(&user);

        assert_eq!(stats.enrolled, user.enrolled_courses);
        assert_eq!(stats.completed, user.completed_courses);
        assert_eq!(stats.in_progress, user.enrolled_courses - user.completed_courses);
        assert_eq!(stats.study_hours, STUDY_HOURS);
    }

    #[test]
    fn test_tab_selection_overwrites() {
        let mut view = DashboardView::new();
        assert_eq!(view.active_tab(), DashboardTab::Overview);

        view.select_tab(DashboardTab::Goals);
        view.select_tab(DashboardTab::Schedule);
        assert_eq!(view.active_tab(), DashboardTab::Schedule);
    }

    #[test]
    fn test_tab_labels() {
        let labels: Vec<_> = DashboardTab::all().iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["Overview", "My Courses", "Schedule", "Goals"]);
    }

    #[test]
    fn test_recent_courses_progress_in_range() {
        let view = DashboardView::new();
        assert_eq!(view.recent_courses().len(), 3);
        assert!(view.recent_courses().iter().all(|c| c.progress <= 100));
        assert_eq!(view.achievements()[1].kind, "streak");
    }
}
