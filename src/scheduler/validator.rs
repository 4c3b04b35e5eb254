//! Incremental validation of manual placements.
//!
//! When an operator inserts or moves a single session by hand, the
//! committed timetable is re-checked against the same hard constraints
//! the generator enforces, decomposed into per-dimension reasons so
//! the UI can show a precise message.
//!
//! Validation is a pure predicate: it rebuilds a fresh
//! [`ConflictIndex`] from the committed store (minus the session being
//! replaced) and mutates nothing.

use crate::conflict::ConflictIndex;
use crate::error::{ConfigurationError, ConflictReason, ValidateError};
use crate::models::{PlacedSession, SlotGrid, Timetable};
use crate::snapshot::EntitySnapshot;

use super::LAB_BLOCK_SLOTS;

/// Validates single-session edits against the committed timetable.
///
/// # Example
///
/// ```
/// use weektable::models::{
///     Class, Classroom, Course, Day, PlacedSession, SlotGrid, Subject, Teacher, TimeOfDay,
///     Timetable,
/// };
/// use weektable::scheduler::PlacementValidator;
/// use weektable::snapshot::EntitySnapshot;
///
/// let snapshot = EntitySnapshot {
///     teachers: vec![Teacher::new("T1")],
///     classrooms: vec![Classroom::theory("R1")],
///     classes: vec![Class::new("C1")],
///     subjects: vec![Subject::new("S1", "CS201")],
///     courses: vec![Course::new("K1", "C1", "S1", "T1").with_weekly_sessions(3)],
///     overrides: vec![],
/// };
/// let grid = SlotGrid::standard();
/// let timetable = Timetable::new();
///
/// let proposed = PlacedSession::new(
///     "C1", "K1", "T1", "R1",
///     Day::Mon, TimeOfDay::hm(9, 0), TimeOfDay::hm(10, 0),
/// );
/// let validator = PlacementValidator::new(&snapshot, &grid, &timetable);
/// assert!(validator.validate(&proposed, None).is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlacementValidator<'a> {
    snapshot: &'a EntitySnapshot,
    grid: &'a SlotGrid,
    timetable: &'a Timetable,
}

impl<'a> PlacementValidator<'a> {
    /// Creates a validator over the current committed state.
    pub fn new(snapshot: &'a EntitySnapshot, grid: &'a SlotGrid, timetable: &'a Timetable) -> Self {
        Self {
            snapshot,
            grid,
            timetable,
        }
    }

    /// Checks one proposed insert or move.
    ///
    /// Pass the session's own id as `excluding` when editing in place,
    /// so it is not compared against itself.
    ///
    /// Checks, in order: entity references, grid alignment, exact lab
    /// duration, the course's weekly quota, then teacher / classroom /
    /// class-or-batch occupancy.
    pub fn validate(
        &self,
        proposed: &PlacedSession,
        excluding: Option<u64>,
    ) -> Result<(), ValidateError> {
        let course = self.snapshot.course(&proposed.course_id)?;
        self.snapshot.teacher(&proposed.teacher_id)?;
        self.snapshot.classroom(&proposed.classroom_id)?;
        self.snapshot.class_group(&proposed.class_id)?;
        self.snapshot.subject(&course.subject_id)?;

        let slots = self.grid.covering(proposed.start, proposed.end);
        if slots.is_empty() {
            return Err(ConfigurationError::OffGrid {
                start: proposed.start,
                end: proposed.end,
            }
            .into());
        }

        if course.is_lab {
            let exact = slots.len() == LAB_BLOCK_SLOTS
                && self.grid.span(slots[0], LAB_BLOCK_SLOTS)
                    == Some((proposed.start, proposed.end));
            if !exact {
                return Err(ConflictReason::DurationMismatch {
                    expected_slots: LAB_BLOCK_SLOTS,
                }
                .into());
            }
        }

        let quota = if course.is_lab {
            course.lab_blocks()
        } else {
            course.weekly_sessions
        };
        let already_placed = self
            .timetable
            .sessions()
            .iter()
            .filter(|s| excluding != Some(s.id))
            .filter(|s| s.course_id == proposed.course_id && s.batch == proposed.batch)
            .count() as u32;
        if already_placed >= quota {
            return Err(ConflictReason::WeeklyQuotaExceeded {
                course_id: course.id.clone(),
                quota,
            }
            .into());
        }

        let index = ConflictIndex::from_timetable(self.grid, self.timetable, excluding);
        if index.teacher_busy(proposed.day, &slots, &proposed.teacher_id) {
            return Err(ConflictReason::TeacherConflict {
                teacher_id: proposed.teacher_id.clone(),
                day: proposed.day,
                start: proposed.start,
                end: proposed.end,
            }
            .into());
        }
        if index.classroom_busy(proposed.day, &slots, &proposed.classroom_id) {
            return Err(ConflictReason::ClassroomConflict {
                classroom_id: proposed.classroom_id.clone(),
                day: proposed.day,
                start: proposed.start,
                end: proposed.end,
            }
            .into());
        }
        if index.group_busy(proposed.day, &slots, &proposed.class_id, proposed.batch) {
            return Err(ConflictReason::ClassOrBatchConflict {
                class_id: proposed.class_id.clone(),
                batch: proposed.batch,
                day: proposed.day,
                start: proposed.start,
                end: proposed.end,
            }
            .into());
        }

        Ok(())
    }
}
