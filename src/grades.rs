use std::collections::HashMap;

/// Letter grades whose points and hours both factor into GPA.
///
/// `E`, `WF`, `I` and `NG` carry zero points but their credit hours still
/// land in the GPA denominator.
pub const GRADES_THAT_COUNT: &[(&str, f64)] = &[
    ("A", 4.0),
    ("A-", 3.67),
    ("B+", 3.33),
    ("B", 3.0),
    ("B-", 2.67),
    ("C+", 2.33),
    ("C", 2.0),
    ("C-", 1.67),
    ("D+", 1.33),
    ("D", 1.0),
    ("D-", 0.67),
    ("E", 0.0),
    ("WF", 0.0),
    ("I", 0.0),
    ("NG", 0.0),
];

/// Symbols excluded from GPA entirely: neither their points nor their
/// credit hours enter the computation. The 0.0 is for lookup convenience.
pub const GRADES_THAT_DONT_COUNT: &[(&str, f64)] = &[
    ("S", 0.0),
    ("U", 0.0),
    ("W", 0.0),
    ("H", 0.0),
    ("I*", 0.0),
    ("N*", 0.0),
];

/// Immutable lookup over the full grade symbol set.
#[derive(Debug, Clone)]
pub struct GradeTable {
    points: HashMap<&'static str, f64>,
    counted: HashMap<&'static str, f64>,
}

impl GradeTable {
    pub fn standard() -> Self {
        let counted: HashMap<&'static str, f64> = GRADES_THAT_COUNT.iter().copied().collect();
        let mut points = counted.clone();
        points.extend(GRADES_THAT_DONT_COUNT.iter().copied());
        Self { points, counted }
    }

    pub fn is_valid(&self, symbol: &str) -> bool {
        self.points.contains_key(symbol)
    }

    /// Trim + uppercase + validate. Unknown symbols are rejected, not
    /// coerced to a default.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let normalized = raw.trim().to_ascii_uppercase();
        self.is_valid(&normalized).then_some(normalized)
    }

    pub fn points(&self, symbol: &str) -> Option<f64> {
        self.points.get(symbol).copied()
    }

    /// Whether the symbol's points and hours enter GPA computation. Callers
    /// summing grade-point contributions must check this, not just the point
    /// table: several symbols carry 0.0 points but are excluded outright.
    pub fn counts_toward_gpa(&self, symbol: &str) -> bool {
        self.counted.contains_key(symbol)
    }
}

impl Default for GradeTable {
    fn default() -> Self {
        Self::standard()
    }
}
