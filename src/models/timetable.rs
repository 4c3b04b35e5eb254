//! Placed sessions and the committed timetable store.
//!
//! A [`Timetable`] is the durable result of scheduling: the set of
//! placed sessions the rest of the application reads (per-class grids,
//! exports) and that manual edits mutate one session at a time.
//!
//! Bulk regeneration goes through [`Timetable::commit`], which replaces
//! the full session set in one call; readers never observe a cleared
//! but not yet repopulated store.

use serde::{Deserialize, Serialize};

use super::time::{intervals_overlap, Day, TimeOfDay};

/// A scheduled teaching session.
///
/// `batch = None` denotes a whole-class (theory) session; labs carry
/// the batch number they were placed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedSession {
    /// Store-assigned identifier; 0 until committed or upserted.
    pub id: u64,
    /// Class the session belongs to.
    pub class_id: String,
    /// Day of the week.
    pub day: Day,
    /// Session start.
    pub start: TimeOfDay,
    /// Session end.
    pub end: TimeOfDay,
    /// Course this session delivers.
    pub course_id: String,
    /// Teacher in front of the group.
    pub teacher_id: String,
    /// Room occupied.
    pub classroom_id: String,
    /// Batch number for lab sessions; `None` for whole-class sessions.
    pub batch: Option<u8>,
}

impl PlacedSession {
    /// Creates an uncommitted whole-class session (id 0).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        class_id: impl Into<String>,
        course_id: impl Into<String>,
        teacher_id: impl Into<String>,
        classroom_id: impl Into<String>,
        day: Day,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Self {
        Self {
            id: 0,
            class_id: class_id.into(),
            day,
            start,
            end,
            course_id: course_id.into(),
            teacher_id: teacher_id.into(),
            classroom_id: classroom_id.into(),
            batch: None,
        }
    }

    /// Marks the session as belonging to a lab batch.
    pub fn for_batch(mut self, batch: u8) -> Self {
        self.batch = Some(batch);
        self
    }

    /// Session length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.start.minutes_until(self.end)
    }

    /// Whether two sessions occupy intersecting time on the same day.
    pub fn overlaps(&self, other: &PlacedSession) -> bool {
        self.day == other.day
            && intervals_overlap(self.start, self.end, other.start, other.end)
    }
}

/// The committed set of placed sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timetable {
    sessions: Vec<PlacedSession>,
    next_id: u64,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
            next_id: 1,
        }
    }

    /// Replaces the entire session set.
    ///
    /// Ids are (re)assigned in insertion order. This is the commit
    /// boundary for bulk regeneration: a single call, so readers see
    /// either the old set or the new one.
    pub fn commit(&mut self, sessions: Vec<PlacedSession>) {
        self.sessions.clear();
        self.next_id = 1;
        for mut session in sessions {
            session.id = self.next_id;
            self.next_id += 1;
            self.sessions.push(session);
        }
    }

    /// Inserts a new session or replaces the one with the same id.
    ///
    /// A session with id 0 gets a fresh id. Returns the stored id.
    pub fn upsert(&mut self, mut session: PlacedSession) -> u64 {
        if session.id == 0 {
            session.id = self.next_id;
            self.next_id += 1;
        }
        let id = session.id;
        self.next_id = self.next_id.max(id + 1);
        match self.sessions.iter_mut().find(|s| s.id == id) {
            Some(existing) => *existing = session,
            None => self.sessions.push(session),
        }
        id
    }

    /// Removes a session by id. Returns whether it existed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        self.sessions.len() != before
    }

    /// Finds a session by id.
    pub fn get(&self, id: u64) -> Option<&PlacedSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// All committed sessions.
    pub fn sessions(&self) -> &[PlacedSession] {
        &self.sessions
    }

    /// Sessions for one class (lab batches included).
    pub fn sessions_for_class(&self, class_id: &str) -> Vec<&PlacedSession> {
        self.sessions
            .iter()
            .filter(|s| s.class_id == class_id)
            .collect()
    }

    /// Sessions taught by one teacher.
    pub fn sessions_for_teacher(&self, teacher_id: &str) -> Vec<&PlacedSession> {
        self.sessions
            .iter()
            .filter(|s| s.teacher_id == teacher_id)
            .collect()
    }

    /// Sessions on one day, across all classes.
    pub fn sessions_on(&self, day: Day) -> Vec<&PlacedSession> {
        self.sessions.iter().filter(|s| s.day == day).collect()
    }

    /// Number of committed sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(class: &str, teacher: &str, day: Day, h: u16) -> PlacedSession {
        PlacedSession::new(
            class,
            "K1",
            teacher,
            "R1",
            day,
            TimeOfDay::hm(h, 0),
            TimeOfDay::hm(h + 1, 0),
        )
    }

    #[test]
    fn test_commit_assigns_ids() {
        let mut tt = Timetable::new();
        tt.commit(vec![
            session("C1", "T1", Day::Mon, 9),
            session("C1", "T2", Day::Tue, 10),
        ]);
        assert_eq!(tt.len(), 2);
        assert_eq!(tt.sessions()[0].id, 1);
        assert_eq!(tt.sessions()[1].id, 2);
    }

    #[test]
    fn test_commit_replaces_everything() {
        let mut tt = Timetable::new();
        tt.commit(vec![session("C1", "T1", Day::Mon, 9)]);
        tt.commit(vec![session("C2", "T2", Day::Wed, 11)]);
        assert_eq!(tt.len(), 1);
        assert_eq!(tt.sessions()[0].class_id, "C2");
        assert_eq!(tt.sessions()[0].id, 1);
    }

    #[test]
    fn test_upsert_insert_and_replace() {
        let mut tt = Timetable::new();
        let id = tt.upsert(session("C1", "T1", Day::Mon, 9));
        assert_eq!(id, 1);

        let mut moved = tt.get(id).unwrap().clone();
        moved.day = Day::Fri;
        let same_id = tt.upsert(moved);
        assert_eq!(same_id, id);
        assert_eq!(tt.len(), 1);
        assert_eq!(tt.get(id).unwrap().day, Day::Fri);

        let other = tt.upsert(session("C1", "T2", Day::Tue, 10));
        assert_eq!(other, 2);
        assert_eq!(tt.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut tt = Timetable::new();
        let id = tt.upsert(session("C1", "T1", Day::Mon, 9));
        assert!(tt.remove(id));
        assert!(!tt.remove(id));
        assert!(tt.is_empty());
    }

    #[test]
    fn test_class_and_teacher_queries() {
        let mut tt = Timetable::new();
        tt.commit(vec![
            session("C1", "T1", Day::Mon, 9),
            session("C1", "T2", Day::Mon, 10),
            session("C2", "T1", Day::Tue, 9),
        ]);
        assert_eq!(tt.sessions_for_class("C1").len(), 2);
        assert_eq!(tt.sessions_for_teacher("T1").len(), 2);
        assert_eq!(tt.sessions_on(Day::Mon).len(), 2);
        assert!(tt.sessions_for_class("C9").is_empty());
    }

    #[test]
    fn test_overlap_helper() {
        let a = session("C1", "T1", Day::Mon, 9);
        let mut b = session("C2", "T2", Day::Mon, 9);
        b.start = TimeOfDay::hm(9, 30);
        b.end = TimeOfDay::hm(10, 30);
        assert!(a.overlaps(&b));

        let c = session("C3", "T3", Day::Tue, 9);
        assert!(!a.overlaps(&c)); // different day

        let d = session("C4", "T4", Day::Mon, 10);
        assert!(!a.overlaps(&d)); // touching, not overlapping
    }

    #[test]
    fn test_batch_marker() {
        let lab = session("C1", "T1", Day::Mon, 9).for_batch(2);
        assert_eq!(lab.batch, Some(2));
        assert_eq!(lab.duration_minutes(), 60);
    }
}
