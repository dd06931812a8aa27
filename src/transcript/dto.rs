use std::collections::HashMap;

use serde::Deserialize;

/// Raw unofficial-transcript document as served by the university API.
///
/// Every field defaults: the upstream shape varies across capture points and
/// missing data must degrade to "no snapshot" downstream, never to a decode
/// error here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    #[serde(default)]
    pub records: HashMap<String, Option<TranscriptRecord>>,
}

/// One academic career (undergraduate, graduate, ...).
///
/// Cumulative numerics arrive as strings and are parsed during
/// reconciliation; `gpa` is the transcript's own self-reported figure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRecord {
    #[serde(default)]
    pub grade_points_earned: String,
    #[serde(default)]
    pub hours_carried: String,
    #[serde(default)]
    pub gpa: String,
    #[serde(default)]
    pub terms: Vec<TranscriptTerm>,
}

/// Terms are ordered chronologically; the last one is the current term.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptTerm {
    #[serde(default)]
    pub term_code: i64,
    #[serde(default)]
    pub term_description: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub credit_sources: Vec<CreditSource>,
}

/// A category of hours toward a term: in-residence enrollment ("ENRL"),
/// transfer credit, test credit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSource {
    #[serde(default)]
    pub source_type: String,
    #[serde(default)]
    pub sessions: Vec<CreditSession>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSession {
    #[serde(default)]
    pub courses: Vec<TranscriptCourse>,
}

/// One course row. `hours_carried` is forced to zero for some in-progress
/// grade codes, so `credits_attempted` is the authoritative credit weight
/// for a course that is still pending.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptCourse {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub catalog_number: String,
    #[serde(default)]
    pub class_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub credits_attempted: f64,
    #[serde(default)]
    pub hours_carried: f64,
    #[serde(default)]
    pub hours_earned: f64,
}
