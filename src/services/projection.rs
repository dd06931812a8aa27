use crate::grades::GradeTable;
use crate::models::{DegreeSnapshot, PendingCourse, ProjectionDetails};

/// Pure what-if arithmetic over pending courses. No side effects, no
/// failure mode: sums default to zero over an empty input.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    grades: GradeTable,
}

impl ProjectionEngine {
    pub fn new(grades: GradeTable) -> Self {
        Self { grades }
    }

    /// A course contributes only when its hypothetical grade is set and
    /// counts toward GPA. Non-counting grades are excluded from both sums,
    /// not zeroed: their hours must stay out of the denominator too.
    pub fn project(&self, courses: &[PendingCourse]) -> ProjectionDetails {
        let mut added_grade_points = 0.0;
        let mut added_credit_hours = 0.0;

        for course in courses {
            let Some(grade) = &course.grade else {
                continue;
            };
            if !self.grades.counts_toward_gpa(grade) {
                continue;
            }
            let Some(points) = self.grades.points(grade) else {
                continue;
            };
            added_grade_points += points * course.credits;
            added_credit_hours += course.credits;
        }

        ProjectionDetails {
            added_grade_points,
            added_credit_hours,
        }
    }
}

/// `None` when no credit hours exist yet, rather than a NaN or infinite
/// figure the caller would have to screen out.
pub fn current_gpa(grade_points: f64, credit_hours: f64) -> Option<f64> {
    (credit_hours != 0.0).then(|| grade_points / credit_hours)
}

pub fn projected_gpa(snapshot: &DegreeSnapshot, details: &ProjectionDetails) -> Option<f64> {
    current_gpa(
        snapshot.grade_points + details.added_grade_points,
        snapshot.credit_hours + details.added_credit_hours,
    )
}
