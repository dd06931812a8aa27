use serde::{Deserialize, Serialize};

/// A current-term course with no final letter grade recorded yet.
///
/// `grade` holds a normalized hypothetical grade assigned by the user, never
/// a grade from the transcript itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingCourse {
    pub id: String,
    pub code: String,
    pub title: String,
    pub credits: f64,
    pub grade: Option<String>,
}

/// Reconciled summary of a student's cumulative standing plus the current
/// term's in-progress courses.
///
/// `credit_hours` has pending-course hours netted out where the source data
/// already included them, so the pending courses here can be added on top
/// without double counting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeSnapshot {
    pub grade_points: f64,
    pub credit_hours: f64,
    pub term: String,
    pub level: String,
    pub pending_courses: Vec<PendingCourse>,
}

/// Contribution of hypothetical grades on top of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionDetails {
    pub added_grade_points: f64,
    pub added_credit_hours: f64,
}
