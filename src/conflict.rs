//! Per-slot occupancy tracking.
//!
//! The conflict index is the working state of one generation or
//! validation pass: for every `(day, teachable slot)` cell it records
//! which teachers, classrooms, and class groups are occupied, and
//! answers overlap queries over slot ranges.
//!
//! It is rebuilt per call and never shared across invocations; the
//! committed [`Timetable`](crate::models::Timetable) is the only
//! durable state.
//!
//! # Group semantics
//!
//! A cell's group tags are `(class, batch)` pairs where `batch = None`
//! marks a whole-class session. A whole-class claim conflicts with any
//! tag of the same class; a batch claim conflicts with the whole-class
//! tag or its own batch's tag, but not with sibling batches (two
//! batches of one class may run labs in parallel under different
//! teachers and rooms).

use std::collections::{HashMap, HashSet};

use crate::models::{Day, PlacedSession, SlotGrid, Timetable};

/// What one placement wants to occupy.
#[derive(Debug, Clone, Copy)]
pub struct SlotClaim<'a> {
    /// Teacher delivering the session.
    pub teacher_id: &'a str,
    /// Room occupied.
    pub classroom_id: &'a str,
    /// Class (or the class a batch belongs to).
    pub class_id: &'a str,
    /// Batch number; `None` for a whole-class session.
    pub batch: Option<u8>,
}

impl<'a> SlotClaim<'a> {
    /// Claim for an already-built session.
    pub fn of(session: &'a PlacedSession) -> Self {
        Self {
            teacher_id: &session.teacher_id,
            classroom_id: &session.classroom_id,
            class_id: &session.class_id,
            batch: session.batch,
        }
    }
}

#[derive(Debug, Default)]
struct CellOccupancy {
    teachers: HashSet<String>,
    classrooms: HashSet<String>,
    groups: HashSet<(String, Option<u8>)>,
}

/// Occupancy map over `(day, teachable slot)` cells.
#[derive(Debug, Default)]
pub struct ConflictIndex {
    cells: HashMap<(Day, usize), CellOccupancy>,
}

impl ConflictIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the index from every committed session except
    /// `excluding` (the session being replaced by an in-place edit).
    ///
    /// Session intervals are mapped back onto teachable slots through
    /// the grid; a session is marked in every slot its interval
    /// touches.
    pub fn from_timetable(grid: &SlotGrid, timetable: &Timetable, excluding: Option<u64>) -> Self {
        let mut index = Self::new();
        for session in timetable.sessions() {
            if excluding == Some(session.id) {
                continue;
            }
            let slots = grid.covering(session.start, session.end);
            index.reserve(session.day, &slots, SlotClaim::of(session));
        }
        index
    }

    /// Whether the claim's teacher already occupies any cell in range.
    pub fn teacher_busy(&self, day: Day, slots: &[usize], teacher_id: &str) -> bool {
        self.any_cell(day, slots, |cell| cell.teachers.contains(teacher_id))
    }

    /// Whether the claim's classroom already occupies any cell in range.
    pub fn classroom_busy(&self, day: Day, slots: &[usize], classroom_id: &str) -> bool {
        self.any_cell(day, slots, |cell| cell.classrooms.contains(classroom_id))
    }

    /// Whether the class (or batch) is already occupied in the range.
    ///
    /// See the module docs for whole-class vs batch semantics.
    pub fn group_busy(&self, day: Day, slots: &[usize], class_id: &str, batch: Option<u8>) -> bool {
        self.any_cell(day, slots, |cell| match batch {
            // Whole-class sessions exclude everything for the class.
            None => cell.groups.iter().any(|(c, _)| c == class_id),
            Some(b) => {
                cell.groups.contains(&(class_id.to_string(), None))
                    || cell.groups.contains(&(class_id.to_string(), Some(b)))
            }
        })
    }

    /// Whether every cell in the range is free for the claim.
    pub fn is_free(&self, day: Day, slots: &[usize], claim: SlotClaim<'_>) -> bool {
        !self.teacher_busy(day, slots, claim.teacher_id)
            && !self.classroom_busy(day, slots, claim.classroom_id)
            && !self.group_busy(day, slots, claim.class_id, claim.batch)
    }

    /// Marks every cell in the range occupied by the claim.
    ///
    /// The engine is single-threaded; callers check [`is_free`]
    /// immediately before reserving.
    ///
    /// [`is_free`]: Self::is_free
    pub fn reserve(&mut self, day: Day, slots: &[usize], claim: SlotClaim<'_>) {
        for &slot in slots {
            let cell = self.cells.entry((day, slot)).or_default();
            cell.teachers.insert(claim.teacher_id.to_string());
            cell.classrooms.insert(claim.classroom_id.to_string());
            cell.groups
                .insert((claim.class_id.to_string(), claim.batch));
        }
    }

    fn any_cell(&self, day: Day, slots: &[usize], pred: impl Fn(&CellOccupancy) -> bool) -> bool {
        slots
            .iter()
            .filter_map(|&slot| self.cells.get(&(day, slot)))
            .any(pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOfDay;

    fn claim<'a>(teacher: &'a str, room: &'a str, class: &'a str, batch: Option<u8>) -> SlotClaim<'a> {
        SlotClaim {
            teacher_id: teacher,
            classroom_id: room,
            class_id: class,
            batch,
        }
    }

    #[test]
    fn test_empty_index_is_free() {
        let index = ConflictIndex::new();
        assert!(index.is_free(Day::Mon, &[0, 1], claim("T1", "R1", "C1", None)));
    }

    #[test]
    fn test_teacher_conflict() {
        let mut index = ConflictIndex::new();
        index.reserve(Day::Mon, &[0, 1], claim("T1", "R1", "C1", None));

        // Same teacher, any overlapping slot, anywhere else.
        assert!(index.teacher_busy(Day::Mon, &[1, 2], "T1"));
        assert!(!index.is_free(Day::Mon, &[1], claim("T1", "R2", "C2", None)));
        // Disjoint slots or another day are fine.
        assert!(index.is_free(Day::Mon, &[2], claim("T1", "R2", "C2", None)));
        assert!(index.is_free(Day::Tue, &[0], claim("T1", "R2", "C2", None)));
    }

    #[test]
    fn test_classroom_conflict() {
        let mut index = ConflictIndex::new();
        index.reserve(Day::Wed, &[3], claim("T1", "R1", "C1", None));
        assert!(index.classroom_busy(Day::Wed, &[3], "R1"));
        assert!(!index.is_free(Day::Wed, &[3], claim("T2", "R1", "C2", None)));
        assert!(index.is_free(Day::Wed, &[3], claim("T2", "R2", "C2", None)));
    }

    #[test]
    fn test_whole_class_blocks_batches() {
        let mut index = ConflictIndex::new();
        index.reserve(Day::Mon, &[0], claim("T1", "R1", "C1", None));

        // Any batch of the same class is blocked by the whole-class tag.
        assert!(index.group_busy(Day::Mon, &[0], "C1", Some(1)));
        assert!(index.group_busy(Day::Mon, &[0], "C1", Some(2)));
        // Another class is unaffected.
        assert!(!index.group_busy(Day::Mon, &[0], "C2", Some(1)));
    }

    #[test]
    fn test_batch_blocks_whole_class() {
        let mut index = ConflictIndex::new();
        index.reserve(Day::Mon, &[0], claim("T1", "R1", "C1", Some(1)));

        // A whole-class lecture may not coincide with any batch lab.
        assert!(index.group_busy(Day::Mon, &[0], "C1", None));
    }

    #[test]
    fn test_sibling_batches_coexist() {
        let mut index = ConflictIndex::new();
        index.reserve(Day::Mon, &[0, 1], claim("T1", "R1", "C1", Some(1)));

        // Batch 2 in a different room with a different teacher: allowed.
        assert!(index.is_free(Day::Mon, &[0, 1], claim("T2", "R2", "C1", Some(2))));
        // Same batch again: blocked.
        assert!(index.group_busy(Day::Mon, &[0], "C1", Some(1)));
    }

    #[test]
    fn test_from_timetable_excluding() {
        let grid = SlotGrid::standard();
        let mut tt = Timetable::new();
        let id = tt.upsert(PlacedSession::new(
            "C1",
            "K1",
            "T1",
            "R1",
            Day::Mon,
            TimeOfDay::hm(9, 0),
            TimeOfDay::hm(10, 0),
        ));

        let index = ConflictIndex::from_timetable(&grid, &tt, None);
        assert!(index.teacher_busy(Day::Mon, &[0], "T1"));

        // Excluding the session leaves its cells free.
        let index = ConflictIndex::from_timetable(&grid, &tt, Some(id));
        assert!(!index.teacher_busy(Day::Mon, &[0], "T1"));
    }

    #[test]
    fn test_off_slot_times_mark_overlapped_cells() {
        // A manually edited session at 09:30-10:30 occupies slots 0 and 1.
        let grid = SlotGrid::standard();
        let mut tt = Timetable::new();
        tt.upsert(PlacedSession::new(
            "C1",
            "K1",
            "T1",
            "R1",
            Day::Mon,
            TimeOfDay::hm(9, 30),
            TimeOfDay::hm(10, 30),
        ));
        let index = ConflictIndex::from_timetable(&grid, &tt, None);
        assert!(index.teacher_busy(Day::Mon, &[0], "T1"));
        assert!(index.teacher_busy(Day::Mon, &[1], "T1"));
        assert!(!index.teacher_busy(Day::Mon, &[2], "T1"));
    }
}
