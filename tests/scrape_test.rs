use gradecast::scrape::{DomScraper, ScraperConfig};

fn course_row(id: &str, title: &str, grade: &str, attempted: &str, earned: &str, credits: &str) -> String {
    format!(
        r#"
        <div class="grid MuiGrid-item">{id}</div>
        <div class="grid MuiGrid-item"><p aria-label="course title - {title}">{title}</p></div>
        <div class="grid MuiGrid-item">{grade}</div>
        <div class="grid MuiGrid-item">{attempted}</div>
        <div class="grid MuiGrid-item">{earned}</div>
        <div class="grid MuiGrid-item">{credits}</div>
        "#
    )
}

fn page(rows: &str) -> String {
    format!(
        r#"<html><body>
        <label for="cume-points">Cumulative   Grade Points</label>
        <div id="cume-points"><span>45.0</span></div>
        <label for="cume-hours">Cumulative Hours Carried</label>
        <div id="cume-hours">15.0</div>
        {rows}
        </body></html>"#
    )
}

#[test]
fn collects_snapshot_from_rendered_page() {
    let rows = course_row("COP3502", "Programming Fundamentals 1", "--", "3.00", "0.00", "3.00");
    let scraper = DomScraper::default();

    let snapshot = scraper
        .collect_snapshot(&page(&rows))
        .expect("expected a snapshot");

    assert_eq!(snapshot.grade_points, 45.0);
    assert_eq!(snapshot.credit_hours, 15.0);
    assert_eq!(snapshot.pending_courses.len(), 1);

    let course = &snapshot.pending_courses[0];
    assert_eq!(course.id, "COP3502");
    assert_eq!(course.title, "Programming Fundamentals 1");
    assert_eq!(course.credits, 3.0);
    assert_eq!(course.grade, None);
}

#[test]
fn invisible_duplicate_rows_collapse_to_one() {
    let row = course_row("COP3502", "Programming Fundamentals 1", "--", "3.00", "0.00", "3.00");
    let rows = format!("{row}{row}");
    let scraper = DomScraper::default();

    let snapshot = scraper
        .collect_snapshot(&page(&rows))
        .expect("expected a snapshot");

    assert_eq!(snapshot.pending_courses.len(), 1);
}

#[test]
fn graded_rows_are_not_pending() {
    let rows = [
        course_row("COP3502", "Programming Fundamentals 1", "--", "3.00", "0.00", "3.00"),
        course_row("MAC2311", "Calculus 1", "A", "4.00", "4.00", "4.00"),
    ]
    .concat();
    let scraper = DomScraper::default();

    let snapshot = scraper
        .collect_snapshot(&page(&rows))
        .expect("expected a snapshot");

    assert_eq!(snapshot.pending_courses.len(), 1);
    assert_eq!(snapshot.pending_courses[0].id, "COP3502");
}

#[test]
fn rows_with_earned_hours_are_not_pending() {
    let rows = [
        course_row("COP3502", "Programming Fundamentals 1", "--", "3.00", "0.00", "3.00"),
        course_row("EGN1002", "Engineering Design", "--", "3.00", "3.00", "3.00"),
    ]
    .concat();
    let scraper = DomScraper::default();

    let snapshot = scraper
        .collect_snapshot(&page(&rows))
        .expect("expected a snapshot");

    assert_eq!(snapshot.pending_courses.len(), 1);
    assert_eq!(snapshot.pending_courses[0].id, "COP3502");
}

#[test]
fn missing_label_means_no_snapshot() {
    let rows = course_row("COP3502", "Programming Fundamentals 1", "--", "3.00", "0.00", "3.00");
    let html = format!("<html><body>{rows}</body></html>");
    let scraper = DomScraper::default();

    assert!(scraper.collect_snapshot(&html).is_none());
}

#[test]
fn page_without_pending_rows_means_no_snapshot() {
    let rows = course_row("MAC2311", "Calculus 1", "A", "4.00", "4.00", "4.00");
    let scraper = DomScraper::default();

    assert!(scraper.collect_snapshot(&page(&rows)).is_none());
}

#[test]
fn label_match_is_whitespace_insensitive_but_exact() {
    // The fixture's grade points label has collapsed-whitespace text
    // "Cumulative Grade Points"; a scraper configured for different label
    // text must not match it.
    let rows = course_row("COP3502", "Programming Fundamentals 1", "--", "3.00", "0.00", "3.00");
    let scraper = DomScraper::new(ScraperConfig {
        grade_points_label: "Cumulative Grade Points Earned".to_string(),
        ..ScraperConfig::default()
    });

    assert!(scraper.collect_snapshot(&page(&rows)).is_none());
}
