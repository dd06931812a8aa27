use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::models::{DegreeSnapshot, PendingCourse};
use crate::transcript::dto::{TranscriptCourse, TranscriptResponse};

/// How in-progress courses are recognized. Transcript shapes vary: some
/// capture points carry a class number only on actively enrolled rows,
/// others leave the grade field empty until one posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingFilter {
    ClassNumberPresent,
    EmptyGrade,
}

/// Turns one raw transcript response into exactly one `DegreeSnapshot`, or
/// nothing when the data cannot support a complete one. Never emits a
/// snapshot with partially-resolved numerics.
#[derive(Debug, Clone)]
pub struct SnapshotReconciler {
    pending_filter: PendingFilter,
}

impl SnapshotReconciler {
    pub fn new(pending_filter: PendingFilter) -> Self {
        Self { pending_filter }
    }

    pub fn reconcile_value(&self, raw: &Value) -> Option<DegreeSnapshot> {
        let transcript: TranscriptResponse = match serde_json::from_value(raw.clone()) {
            Ok(transcript) => transcript,
            Err(e) => {
                debug!("transcript document did not decode: {}", e);
                return None;
            }
        };
        self.reconcile(&transcript)
    }

    pub fn reconcile(&self, transcript: &TranscriptResponse) -> Option<DegreeSnapshot> {
        // The most recently active career: the record whose last term has
        // the highest term code.
        let record = transcript
            .records
            .values()
            .flatten()
            .max_by_key(|record| record.terms.last().map(|term| term.term_code).unwrap_or(0))?;

        let current = record.terms.last()?;

        let mut pending = Vec::new();
        let mut seen = HashSet::new();
        for source in &current.credit_sources {
            if source.source_type != "ENRL" {
                continue;
            }
            for session in &source.sessions {
                for course in &session.courses {
                    if !self.is_pending(course) {
                        continue;
                    }
                    // Transcripts are known to contain duplicate rows.
                    if !course.class_number.is_empty() && !seen.insert(course.class_number.clone())
                    {
                        continue;
                    }
                    pending.push(PendingCourse {
                        id: course.class_number.clone(),
                        code: format!("{}{}", course.subject, course.catalog_number),
                        title: course.title.clone(),
                        // hours_carried is zeroed for some in-progress grade
                        // codes; credits_attempted keeps the nominal weight.
                        credits: course.credits_attempted,
                        grade: None,
                    });
                }
            }
        }

        let grade_points = parse_decimal(&record.grade_points_earned)?;
        let raw_hours = parse_decimal(&record.hours_carried)?;
        let reported_gpa = parse_decimal(&record.gpa)?;

        let pending_credits: f64 = pending.iter().map(|course| course.credits).sum();
        let credit_hours =
            resolve_credit_hours(grade_points, raw_hours, pending_credits, reported_gpa);

        Some(DegreeSnapshot {
            grade_points,
            credit_hours,
            term: current.term_description.clone(),
            level: current.level.clone(),
            pending_courses: pending,
        })
    }

    fn is_pending(&self, course: &TranscriptCourse) -> bool {
        match self.pending_filter {
            PendingFilter::ClassNumberPresent => !course.class_number.is_empty(),
            PendingFilter::EmptyGrade => course.grade.is_empty(),
        }
    }
}

impl Default for SnapshotReconciler {
    fn default() -> Self {
        Self::new(PendingFilter::ClassNumberPresent)
    }
}

fn parse_decimal(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// The raw hours-carried figure sometimes already nets out pending hours
/// and sometimes does not, depending on when the data was captured. Keep
/// whichever candidate implies a GPA closer to the transcript's own figure;
/// an exact tie keeps the raw value.
fn resolve_credit_hours(
    grade_points: f64,
    raw_hours: f64,
    pending_credits: f64,
    reported_gpa: f64,
) -> f64 {
    let netted_hours = raw_hours - pending_credits;
    let raw_distance = implied_gpa_distance(grade_points, raw_hours, reported_gpa);
    let netted_distance = implied_gpa_distance(grade_points, netted_hours, reported_gpa);

    if netted_distance < raw_distance {
        netted_hours
    } else {
        raw_hours
    }
}

fn implied_gpa_distance(grade_points: f64, hours: f64, reported_gpa: f64) -> f64 {
    let implied = grade_points / hours;
    if implied.is_finite() {
        (implied - reported_gpa).abs()
    } else {
        f64::INFINITY
    }
}
