//! Weekly slot grid.
//!
//! An ordered sequence of fixed time intervals shared by every day of
//! the week. Entries are either teaching slots or breaks; the teaching
//! entries form the *teachable* sub-sequence, indexed `0..K-1`, which is
//! the coordinate system the scheduler and conflict index work in.
//!
//! A multi-slot block (a lab) must map to a genuinely contiguous
//! wall-clock interval: [`SlotGrid::span`] returns `None` whenever the
//! block would cross a break or a gap between entries.
//!
//! Rebuilding the grid is always a full replace, never an incremental
//! edit.

use serde::{Deserialize, Serialize};

use super::time::{intervals_overlap, Day, TimeOfDay};
use crate::error::ConfigurationError;

/// One interval of the daily grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGridEntry {
    /// Position in the full grid (breaks included).
    pub index: usize,
    /// Interval start (inclusive).
    pub start: TimeOfDay,
    /// Interval end (exclusive).
    pub end: TimeOfDay,
    /// Whether this entry is a break rather than a teaching slot.
    pub is_break: bool,
    /// Optional break caption (e.g. "Recess").
    pub break_label: Option<String>,
}

/// The weekly slot grid: daily intervals plus the set of teaching days.
///
/// Every day of the week reuses the same entry sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotGrid {
    /// Days the timetable spans, in order.
    pub days: Vec<Day>,
    entries: Vec<SlotGridEntry>,
    /// Full-grid index of each teachable entry.
    teachable: Vec<usize>,
}

impl SlotGrid {
    /// Builds a grid from `(start, end, is_break, label)` tuples.
    ///
    /// Entries must be in order, non-overlapping, and non-empty; at
    /// least one teachable entry is required.
    pub fn new(
        days: Vec<Day>,
        intervals: Vec<(TimeOfDay, TimeOfDay, bool, Option<String>)>,
    ) -> Result<Self, ConfigurationError> {
        let mut entries = Vec::with_capacity(intervals.len());
        let mut prev_end: Option<TimeOfDay> = None;
        for (index, (start, end, is_break, break_label)) in intervals.into_iter().enumerate() {
            if start >= end || prev_end.is_some_and(|p| start < p) {
                return Err(ConfigurationError::MalformedGrid { index });
            }
            prev_end = Some(end);
            entries.push(SlotGridEntry {
                index,
                start,
                end,
                is_break,
                break_label,
            });
        }

        let teachable: Vec<usize> = entries
            .iter()
            .filter(|e| !e.is_break)
            .map(|e| e.index)
            .collect();
        if teachable.is_empty() || days.is_empty() {
            return Err(ConfigurationError::EmptyGrid);
        }

        Ok(Self {
            days,
            entries,
            teachable,
        })
    }

    /// The default college-day grid: seven 60-minute teaching slots
    /// from 09:00 to 16:30 with a 12:00-12:30 recess, Monday through
    /// Saturday.
    pub fn standard() -> Self {
        let h = TimeOfDay::hm;
        let slot = |s: TimeOfDay, e: TimeOfDay| (s, e, false, None);
        Self::new(
            Day::ALL.to_vec(),
            vec![
                slot(h(9, 0), h(10, 0)),
                slot(h(10, 0), h(11, 0)),
                slot(h(11, 0), h(12, 0)),
                (h(12, 0), h(12, 30), true, Some("Recess".to_string())),
                slot(h(12, 30), h(13, 30)),
                slot(h(13, 30), h(14, 30)),
                slot(h(14, 30), h(15, 30)),
                slot(h(15, 30), h(16, 30)),
            ],
        )
        .expect("standard grid is well-formed")
    }

    /// All entries of the daily grid, breaks included.
    pub fn entries(&self) -> &[SlotGridEntry] {
        &self.entries
    }

    /// Number of teachable slots per day.
    #[inline]
    pub fn teachable_count(&self) -> usize {
        self.teachable.len()
    }

    /// The grid entry behind teachable index `i`.
    pub fn teachable_entry(&self, i: usize) -> Option<&SlotGridEntry> {
        self.teachable.get(i).map(|&full| &self.entries[full])
    }

    /// Maps a teachable index plus a duration in teachable slots to an
    /// absolute `(start, end)` interval.
    ///
    /// Reads through the full grid: returns `None` if the block runs
    /// off the end of the day, crosses a break entry, or spans a
    /// wall-clock gap between entries.
    pub fn span(&self, start_teachable: usize, len: usize) -> Option<(TimeOfDay, TimeOfDay)> {
        if len == 0 || start_teachable + len > self.teachable.len() {
            return None;
        }
        let first = &self.entries[self.teachable[start_teachable]];
        let mut end = first.end;
        for i in 1..len {
            let next = &self.entries[self.teachable[start_teachable + i]];
            // Adjacent teachable indices must be adjacent in the full
            // grid and contiguous on the clock.
            if next.index != self.teachable[start_teachable + i - 1] + 1 || next.start != end {
                return None;
            }
            end = next.end;
        }
        Some((first.start, end))
    }

    /// Teachable indices whose interval intersects `[start, end)`.
    pub fn covering(&self, start: TimeOfDay, end: TimeOfDay) -> Vec<usize> {
        self.teachable
            .iter()
            .enumerate()
            .filter(|(_, &full)| {
                let e = &self.entries[full];
                intervals_overlap(start, end, e.start, e.end)
            })
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_grid_shape() {
        let grid = SlotGrid::standard();
        assert_eq!(grid.days.len(), 6);
        assert_eq!(grid.teachable_count(), 7);
        assert_eq!(grid.entries().len(), 8);

        let first = grid.teachable_entry(0).unwrap();
        assert_eq!(first.start, TimeOfDay::hm(9, 0));
        let last = grid.teachable_entry(6).unwrap();
        assert_eq!(last.end, TimeOfDay::hm(16, 30));
        assert!(grid.teachable_entry(7).is_none());
    }

    #[test]
    fn test_span_single_slot() {
        let grid = SlotGrid::standard();
        let (start, end) = grid.span(2, 1).unwrap();
        assert_eq!(start, TimeOfDay::hm(11, 0));
        assert_eq!(end, TimeOfDay::hm(12, 0));
    }

    #[test]
    fn test_span_contiguous_block() {
        let grid = SlotGrid::standard();
        // Slots 0-1: 09:00-11:00.
        let (start, end) = grid.span(0, 2).unwrap();
        assert_eq!(start, TimeOfDay::hm(9, 0));
        assert_eq!(end, TimeOfDay::hm(11, 0));
        // Slots 3-4 sit after the recess: 12:30-14:30.
        let (start, end) = grid.span(3, 2).unwrap();
        assert_eq!(start, TimeOfDay::hm(12, 30));
        assert_eq!(end, TimeOfDay::hm(14, 30));
    }

    #[test]
    fn test_span_rejects_break_crossing() {
        let grid = SlotGrid::standard();
        // Teachable 2 (11:00-12:00) and 3 (12:30-13:30) straddle the recess.
        assert!(grid.span(2, 2).is_none());
    }

    #[test]
    fn test_span_rejects_day_end_overrun() {
        let grid = SlotGrid::standard();
        assert!(grid.span(6, 2).is_none());
        assert!(grid.span(7, 1).is_none());
        assert!(grid.span(0, 0).is_none());
    }

    #[test]
    fn test_span_rejects_clock_gap() {
        // Two teaching slots with an unmodelled half-hour gap between them.
        let h = TimeOfDay::hm;
        let grid = SlotGrid::new(
            vec![Day::Mon],
            vec![
                (h(9, 0), h(10, 0), false, None),
                (h(10, 30), h(11, 30), false, None),
            ],
        )
        .unwrap();
        assert_eq!(grid.teachable_count(), 2);
        assert!(grid.span(0, 2).is_none());
        assert!(grid.span(0, 1).is_some());
    }

    #[test]
    fn test_covering() {
        let grid = SlotGrid::standard();
        // 09:30-10:30 touches slots 0 and 1.
        assert_eq!(
            grid.covering(TimeOfDay::hm(9, 30), TimeOfDay::hm(10, 30)),
            vec![0, 1]
        );
        // Exactly one slot.
        assert_eq!(
            grid.covering(TimeOfDay::hm(12, 30), TimeOfDay::hm(13, 30)),
            vec![3]
        );
        // Entirely inside the recess: no teachable slots.
        assert!(grid
            .covering(TimeOfDay::hm(12, 0), TimeOfDay::hm(12, 30))
            .is_empty());
        // Before the day starts.
        assert!(grid
            .covering(TimeOfDay::hm(7, 0), TimeOfDay::hm(8, 0))
            .is_empty());
    }

    #[test]
    fn test_rejects_overlapping_entries() {
        let h = TimeOfDay::hm;
        let err = SlotGrid::new(
            vec![Day::Mon],
            vec![
                (h(9, 0), h(10, 0), false, None),
                (h(9, 30), h(10, 30), false, None),
            ],
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::MalformedGrid { index: 1 });
    }

    #[test]
    fn test_rejects_empty_interval() {
        let h = TimeOfDay::hm;
        let err = SlotGrid::new(vec![Day::Mon], vec![(h(9, 0), h(9, 0), false, None)]).unwrap_err();
        assert_eq!(err, ConfigurationError::MalformedGrid { index: 0 });
    }

    #[test]
    fn test_rejects_all_breaks() {
        let h = TimeOfDay::hm;
        let err = SlotGrid::new(
            vec![Day::Mon],
            vec![(h(9, 0), h(10, 0), true, Some("Assembly".into()))],
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyGrid);
    }

    #[test]
    fn test_serde_round_trip() {
        let grid = SlotGrid::standard();
        let json = serde_json::to_string(&grid).unwrap();
        let back: SlotGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back.teachable_count(), grid.teachable_count());
        assert_eq!(back.days, grid.days);
    }
}
