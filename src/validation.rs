//! Input validation for entity snapshots.
//!
//! Checks structural integrity of the snapshot before scheduling.
//! Detects:
//! - Duplicate IDs
//! - Dangling references (course → class/subject/teacher/room,
//!   override → course/teacher)
//! - Lab rooms of the wrong kind
//! - Batch numbers outside the class's batch range
//! - Zero-session courses and zero-batch classes

use std::collections::HashSet;

use crate::snapshot::EntitySnapshot;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// Something references an entity that doesn't exist.
    DanglingReference,
    /// A course pins its lab sessions to a non-lab room.
    RoomKindMismatch,
    /// A batch override names a batch the class doesn't have.
    BatchOutOfRange,
    /// A course requires zero weekly sessions, or a class has zero batches.
    EmptyQuantity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an entity snapshot.
///
/// Checks:
/// 1. No duplicate teacher/classroom/class/subject/course IDs
/// 2. `batch_count >= 1` and `weekly_sessions >= 1`
/// 3. Course references (class, subject, teacher, optional lab room)
///    point to existing entities
/// 4. A pinned lab room is actually a lab-kind room
/// 5. Batch overrides reference an existing course's class/subject, an
///    existing teacher, and a batch within range
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &EntitySnapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let teacher_ids = collect_ids(
        snapshot.teachers.iter().map(|t| t.id.as_str()),
        "teacher",
        &mut errors,
    );
    let classroom_ids = collect_ids(
        snapshot.classrooms.iter().map(|c| c.id.as_str()),
        "classroom",
        &mut errors,
    );
    let class_ids = collect_ids(
        snapshot.classes.iter().map(|c| c.id.as_str()),
        "class",
        &mut errors,
    );
    let subject_ids = collect_ids(
        snapshot.subjects.iter().map(|s| s.id.as_str()),
        "subject",
        &mut errors,
    );
    collect_ids(
        snapshot.courses.iter().map(|c| c.id.as_str()),
        "course",
        &mut errors,
    );

    for class in &snapshot.classes {
        if class.batch_count == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyQuantity,
                format!("Class '{}' has zero batches", class.id),
            ));
        }
    }

    for course in &snapshot.courses {
        if course.weekly_sessions == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyQuantity,
                format!("Course '{}' requires zero weekly sessions", course.id),
            ));
        }
        if !class_ids.contains(course.class_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!(
                    "Course '{}' references unknown class '{}'",
                    course.id, course.class_id
                ),
            ));
        }
        if !subject_ids.contains(course.subject_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!(
                    "Course '{}' references unknown subject '{}'",
                    course.id, course.subject_id
                ),
            ));
        }
        if !teacher_ids.contains(course.teacher_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!(
                    "Course '{}' references unknown teacher '{}'",
                    course.id, course.teacher_id
                ),
            ));
        }
        if let Some(room_id) = &course.lab_classroom_id {
            if !classroom_ids.contains(room_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingReference,
                    format!(
                        "Course '{}' references unknown classroom '{}'",
                        course.id, room_id
                    ),
                ));
            } else if snapshot.classroom(room_id).is_ok_and(|r| !r.is_lab()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::RoomKindMismatch,
                    format!(
                        "Course '{}' pins lab sessions to non-lab room '{}'",
                        course.id, room_id
                    ),
                ));
            }
        }
    }

    for o in &snapshot.overrides {
        if !teacher_ids.contains(o.teacher_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!(
                    "Batch override for class '{}' references unknown teacher '{}'",
                    o.class_id, o.teacher_id
                ),
            ));
        }
        let has_course = snapshot
            .courses
            .iter()
            .any(|c| c.class_id == o.class_id && c.subject_id == o.subject_id);
        if !has_course {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingReference,
                format!(
                    "Batch override references no course for class '{}' and subject '{}'",
                    o.class_id, o.subject_id
                ),
            ));
        } else {
            let in_range = snapshot
                .class_group(&o.class_id)
                .is_ok_and(|class| o.batch >= 1 && o.batch <= class.batch_count);
            if !in_range {
                errors.push(ValidationError::new(
                    ValidationErrorKind::BatchOutOfRange,
                    format!(
                        "Batch override names batch {} of class '{}'",
                        o.batch, o.class_id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    entity: &str,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {entity} ID: {id}"),
            ));
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatchTeacherOverride, Class, Classroom, Course, Subject, Teacher};

    fn sample_snapshot() -> EntitySnapshot {
        EntitySnapshot {
            teachers: vec![Teacher::new("T1"), Teacher::new("T2")],
            classrooms: vec![Classroom::theory("R1"), Classroom::lab("R2")],
            classes: vec![Class::new("C1").with_batches(2)],
            subjects: vec![Subject::new("S1", "CS201"), Subject::new("S2", "CSL201")],
            courses: vec![
                Course::new("K1", "C1", "S1", "T1").with_weekly_sessions(3),
                Course::new("K2", "C1", "S2", "T1")
                    .as_lab()
                    .with_weekly_sessions(4)
                    .with_lab_room("R2"),
            ],
            overrides: vec![BatchTeacherOverride::new("C1", "S2", 2, "T2")],
        }
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(validate_snapshot(&sample_snapshot()).is_ok());
    }

    #[test]
    fn test_duplicate_teacher_id() {
        let mut snap = sample_snapshot();
        snap.teachers.push(Teacher::new("T1"));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("teacher")));
    }

    #[test]
    fn test_dangling_course_references() {
        let mut snap = sample_snapshot();
        snap.courses
            .push(Course::new("K3", "NOPE", "S1", "GONE").with_weekly_sessions(1));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::DanglingReference)
                .count(),
            2
        );
    }

    #[test]
    fn test_lab_room_kind_mismatch() {
        let mut snap = sample_snapshot();
        snap.courses.push(
            Course::new("K3", "C1", "S2", "T1")
                .as_lab()
                .with_weekly_sessions(2)
                .with_lab_room("R1"), // theory room
        );
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::RoomKindMismatch));
    }

    #[test]
    fn test_override_batch_out_of_range() {
        let mut snap = sample_snapshot();
        snap.overrides
            .push(BatchTeacherOverride::new("C1", "S2", 5, "T2"));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::BatchOutOfRange));
    }

    #[test]
    fn test_override_without_course() {
        let mut snap = sample_snapshot();
        snap.overrides
            .push(BatchTeacherOverride::new("C1", "S9", 1, "T2"));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DanglingReference
                && e.message.contains("no course")));
    }

    #[test]
    fn test_empty_quantities() {
        let mut snap = sample_snapshot();
        snap.classes.push(Class::new("C2").with_batches(0));
        snap.courses
            .push(Course::new("K4", "C1", "S1", "T1").with_weekly_sessions(0));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::EmptyQuantity)
                .count(),
            2
        );
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut snap = sample_snapshot();
        snap.teachers.push(Teacher::new("T1"));
        snap.courses
            .push(Course::new("K5", "GONE", "S1", "T1").with_weekly_sessions(1));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
