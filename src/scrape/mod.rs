//! Legacy fallback: pull the snapshot straight out of the rendered
//! transcript page when no API access is available. String-level walk, no
//! DOM tree; the page structure is flat enough that label/value pairs and
//! sibling row cells can be recovered from tag boundaries alone.

use std::collections::HashSet;
use std::env;

use crate::models::{DegreeSnapshot, PendingCourse};

/// Page-structure constants, injected rather than hard-coded in the walk.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Exact (whitespace-normalized) text of the cumulative grade points label.
    pub grade_points_label: String,
    /// Exact text of the cumulative hours carried label.
    pub hours_carried_label: String,
    /// Attribute marker on course title elements.
    pub course_title_marker: String,
    /// Class substring shared by every cell of a course row.
    pub cell_marker: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            grade_points_label: "Cumulative Grade Points".to_string(),
            hours_carried_label: "Cumulative Hours Carried".to_string(),
            course_title_marker: r#"aria-label="course title -"#.to_string(),
            cell_marker: "MuiGrid-item".to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            grade_points_label: env::var("SCRAPE_GRADE_POINTS_LABEL")
                .unwrap_or(defaults.grade_points_label),
            hours_carried_label: env::var("SCRAPE_HOURS_CARRIED_LABEL")
                .unwrap_or(defaults.hours_carried_label),
            course_title_marker: env::var("SCRAPE_COURSE_TITLE_MARKER")
                .unwrap_or(defaults.course_title_marker),
            cell_marker: env::var("SCRAPE_CELL_MARKER").unwrap_or(defaults.cell_marker),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DomScraper {
    config: ScraperConfig,
}

impl DomScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// `None` unless both cumulative figures and at least one pending course
    /// row were found; the page has no term banner, so term and level stay
    /// empty on this path.
    pub fn collect_snapshot(&self, html: &str) -> Option<DegreeSnapshot> {
        let grade_points = self.value_for_label(html, &self.config.grade_points_label)?;
        let hours_carried = self.value_for_label(html, &self.config.hours_carried_label)?;
        let pending_courses = self.collect_pending_courses(html);

        if pending_courses.is_empty() {
            return None;
        }

        Some(DegreeSnapshot {
            grade_points,
            credit_hours: hours_carried,
            term: String::new(),
            level: String::new(),
            pending_courses,
        })
    }

    /// Finds a `<label>` whose normalized text matches exactly, resolves the
    /// element its `for` attribute points at, and parses a number out of it.
    fn value_for_label(&self, html: &str, label_text: &str) -> Option<f64> {
        let mut pos = 0;
        while let Some((start, end)) = next_tag_block(html, "<label", "</label>", pos) {
            let block = &html[start..end];
            pos = end;

            if normalize_ws(&strip_tags(inner_after_open_tag(block))) != label_text {
                continue;
            }
            let Some(for_id) = attr_value(open_tag(block), "for") else {
                continue;
            };
            let Some(value_text) = element_text_by_id(html, &for_id) else {
                continue;
            };
            if let Some(value) = parse_numeric(&value_text) {
                return Some(value);
            }
        }
        None
    }

    /// A course row is the run of sibling cells around a title cell:
    /// id, title, grade, attempted, earned, credits. Rows are kept only
    /// while ungraded (grade cell reads `--`, earned hours zero).
    fn collect_pending_courses(&self, html: &str) -> Vec<PendingCourse> {
        let spans = self.cell_spans(html);
        let texts: Vec<String> = spans
            .iter()
            .map(|&(start, end)| normalize_ws(&strip_tags(&html[start..end])))
            .collect();

        let mut pending = Vec::new();
        // The page renders invisible duplicates of every course row.
        let mut seen = HashSet::new();

        for (i, &(start, end)) in spans.iter().enumerate() {
            if !html[start..end].contains(&self.config.course_title_marker) {
                continue;
            }
            let title = texts[i].clone();
            if title.is_empty() {
                continue;
            }
            if i == 0 || i + 4 >= texts.len() {
                continue;
            }

            let id = texts[i - 1].clone();
            if !seen.insert(id.clone()) {
                continue;
            }

            if texts[i + 1] != "--" {
                continue;
            }
            if parse_numeric(&texts[i + 3]) != Some(0.0) {
                continue;
            }
            let Some(credits) = parse_numeric(&texts[i + 4]) else {
                continue;
            };

            pending.push(PendingCourse {
                id: id.clone(),
                code: id,
                title,
                credits,
                grade: None,
            });
        }

        pending
    }

    /// Start/end offsets of each marked cell, in document order. A cell
    /// runs from its opening tag to the start of the next marked cell.
    fn cell_spans(&self, html: &str) -> Vec<(usize, usize)> {
        let mut starts = Vec::new();
        let mut from = 0;
        while let Some(found) = html[from..].find(&self.config.cell_marker) {
            let at = from + found;
            let tag_start = html[..at].rfind('<').unwrap_or(at);
            starts.push(tag_start);
            from = at + self.config.cell_marker.len();
        }

        starts
            .iter()
            .enumerate()
            .map(|(i, &start)| (start, starts.get(i + 1).copied().unwrap_or(html.len())))
            .collect()
    }
}

impl Default for DomScraper {
    fn default() -> Self {
        Self::new(ScraperConfig::default())
    }
}

/* ---------- text helpers ---------- */

pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Strips everything but digits, dot and minus, then parses.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Next `open ... close` block at or after `from`, case-insensitive.
/// Returns the span including both tags.
fn next_tag_block(s: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let lower = s.to_ascii_lowercase();
    let start = lower.get(from..)?.find(&open.to_ascii_lowercase())? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let close_rel = lower[open_end..].find(&close.to_ascii_lowercase())?;
    Some((start, open_end + close_rel + close.len()))
}

fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(end) => &block[..=end],
        None => block,
    }
}

fn inner_after_open_tag(block: &str) -> &str {
    let Some(open_end) = block.find('>') else {
        return "";
    };
    let Some(close_start) = block.rfind('<') else {
        return "";
    };
    if close_start > open_end {
        &block[open_end + 1..close_start]
    } else {
        ""
    }
}

fn attr_value(tag: &str, name: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let needle = format!("{}=\"", name.to_ascii_lowercase());
    let at = lower.find(&needle)? + needle.len();
    let end = tag[at..].find('"')? + at;
    Some(tag[at..end].to_string())
}

/// Text content of the element carrying `id="..."`, tags stripped.
fn element_text_by_id(html: &str, id: &str) -> Option<String> {
    let needle = format!(r#"id="{}""#, id);
    let at = html.find(&needle)?;
    let tag_start = html[..at].rfind('<')?;

    let name_end = html[tag_start + 1..]
        .find(|c: char| c.is_whitespace() || c == '>')?
        + tag_start
        + 1;
    let tag_name = &html[tag_start + 1..name_end];

    let open_end = html[at..].find('>')? + at + 1;
    let close = format!("</{}", tag_name.to_ascii_lowercase());
    let close_at = html[open_end..].to_ascii_lowercase().find(&close)? + open_end;

    Some(strip_tags(&html[open_end..close_at]))
}
