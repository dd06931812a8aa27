use gradecast::grades::{GRADES_THAT_COUNT, GRADES_THAT_DONT_COUNT, GradeTable};
use gradecast::models::{DegreeSnapshot, PendingCourse};
use gradecast::services::ProjectionEngine;
use gradecast::services::projection::{current_gpa, projected_gpa};

fn course(id: &str, credits: f64, grade: Option<&str>) -> PendingCourse {
    PendingCourse {
        id: id.to_string(),
        code: format!("TST{}", id),
        title: format!("Test Course {}", id),
        credits,
        grade: grade.map(str::to_string),
    }
}

#[test]
fn normalization_trims_uppercases_and_validates() {
    let table = GradeTable::standard();

    assert_eq!(table.normalize(" a- "), Some("A-".to_string()));
    assert_eq!(table.normalize("wf"), Some("WF".to_string()));
    assert_eq!(table.normalize("i*"), Some("I*".to_string()));
    assert_eq!(table.normalize("Z"), None);
    assert_eq!(table.normalize(""), None);
}

#[test]
fn every_counting_grade_contributes_points_and_hours() {
    let engine = ProjectionEngine::default();

    for &(symbol, points) in GRADES_THAT_COUNT {
        let details = engine.project(&[course("1", 3.0, Some(symbol))]);
        assert_eq!(details.added_grade_points, points * 3.0, "grade {}", symbol);
        assert_eq!(details.added_credit_hours, 3.0, "grade {}", symbol);
    }
}

#[test]
fn non_counting_grades_contribute_nothing() {
    let engine = ProjectionEngine::default();

    for &(symbol, _) in GRADES_THAT_DONT_COUNT {
        let details = engine.project(&[course("1", 3.0, Some(symbol))]);
        assert_eq!(details.added_grade_points, 0.0, "grade {}", symbol);
        assert_eq!(details.added_credit_hours, 0.0, "grade {}", symbol);
    }
}

#[test]
fn unset_grade_contributes_nothing() {
    let engine = ProjectionEngine::default();
    let details = engine.project(&[course("1", 4.0, None)]);

    assert_eq!(details.added_grade_points, 0.0);
    assert_eq!(details.added_credit_hours, 0.0);
}

#[test]
fn failing_grade_still_counts_its_hours() {
    // E is 0.0 points but its hours stay in the denominator, unlike S/U/W.
    let engine = ProjectionEngine::default();
    let details = engine.project(&[course("1", 3.0, Some("E"))]);

    assert_eq!(details.added_grade_points, 0.0);
    assert_eq!(details.added_credit_hours, 3.0);
}

#[test]
fn mixed_courses_sum_only_the_counting_ones() {
    let engine = ProjectionEngine::default();
    let details = engine.project(&[
        course("1", 3.0, Some("A")),
        course("2", 4.0, Some("B")),
        course("3", 3.0, Some("S")),
        course("4", 2.0, None),
    ]);

    assert_eq!(details.added_grade_points, 4.0 * 3.0 + 3.0 * 4.0);
    assert_eq!(details.added_credit_hours, 7.0);
}

#[test]
fn empty_input_projects_to_zero() {
    let engine = ProjectionEngine::default();
    let details = engine.project(&[]);

    assert_eq!(details.added_grade_points, 0.0);
    assert_eq!(details.added_credit_hours, 0.0);
}

#[test]
fn gpa_guards_division_by_zero() {
    assert_eq!(current_gpa(0.0, 0.0), None);
    assert_eq!(current_gpa(45.0, 15.0), Some(3.0));
}

#[test]
fn projected_gpa_combines_snapshot_and_details() {
    let snapshot = DegreeSnapshot {
        grade_points: 45.0,
        credit_hours: 15.0,
        term: "Spring 2024".to_string(),
        level: "Undergraduate".to_string(),
        pending_courses: vec![course("1", 3.0, Some("A"))],
    };

    let engine = ProjectionEngine::default();
    let details = engine.project(&snapshot.pending_courses);

    // (45 + 12) / (15 + 3)
    let gpa = projected_gpa(&snapshot, &details).expect("expected a projected GPA");
    assert!((gpa - 57.0 / 18.0).abs() < 1e-9);
}

#[test]
fn projected_gpa_is_none_when_no_hours_exist() {
    let snapshot = DegreeSnapshot {
        grade_points: 0.0,
        credit_hours: 0.0,
        term: String::new(),
        level: String::new(),
        pending_courses: vec![],
    };

    let engine = ProjectionEngine::default();
    let details = engine.project(&snapshot.pending_courses);

    assert_eq!(projected_gpa(&snapshot, &details), None);
}
