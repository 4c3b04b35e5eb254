//! Randomized greedy timetable generation.
//!
//! # Algorithm
//!
//! 1. Expand every lab course into `(block, batch)` tasks and place
//!    them first: labs need two contiguous teachable slots and a
//!    lab-kind room, so they are the hardest to fit.
//! 2. Expand every theory course into single-slot lecture tasks and
//!    fill them in around the labs, trying the teacher's preferred half
//!    of the day first.
//!
//! Placement is randomized search with a fixed per-task retry budget
//! instead of backtracking: simpler, fast, and adequate because the
//! inputs are normally under-constrained. Exhausted budgets surface as
//! [`UnplacedTask`] warnings; the run itself never aborts on
//! saturation.

use std::collections::HashMap;

use log::{debug, info, warn};
use rand::prelude::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::conflict::{ConflictIndex, SlotClaim};
use crate::error::ConfigurationError;
use crate::models::{
    Classroom, Course, Day, PlacedSession, SlotGrid, TimeOfDay, TimePreference,
};
use crate::snapshot::EntitySnapshot;

/// Teachable slots per lab block.
pub const LAB_BLOCK_SLOTS: usize = 2;

const DEFAULT_LAB_ATTEMPTS: u32 = 200;
const DEFAULT_LECTURE_ATTEMPTS: u32 = 100;
const DEFAULT_POST_LAB_GAP_MINUTES: u16 = 120;

/// Which kind of session a task stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    /// Two-slot lab block.
    Lab,
    /// Single-slot theory lecture.
    Lecture,
}

/// A session task that exhausted its retry budget.
///
/// Soft failure: the operator places it manually via the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnplacedTask {
    /// Course the task came from.
    pub course_id: String,
    /// Class the session was for.
    pub class_id: String,
    /// Subject taught.
    pub subject_id: String,
    /// Teacher who would have taught it.
    pub teacher_id: String,
    /// Batch number for lab tasks.
    pub batch: Option<u8>,
    /// Lab block or lecture.
    pub kind: SessionKind,
}

/// Result of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOutcome {
    /// Sessions to commit (ids unassigned until
    /// [`Timetable::commit`](crate::models::Timetable::commit)).
    pub sessions: Vec<PlacedSession>,
    /// Tasks that could not be placed.
    pub unplaced: Vec<UnplacedTask>,
}

impl GenerateOutcome {
    /// Whether every task found a slot.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

struct LabTask<'a> {
    course: &'a Course,
    batch: u8,
    teacher_id: &'a str,
    fixed_room: Option<&'a Classroom>,
}

struct LectureTask<'a> {
    course: &'a Course,
    preference: TimePreference,
}

/// Randomized greedy timetable generator.
///
/// # Example
///
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use weektable::models::{Class, Classroom, Course, SlotGrid, Subject, Teacher, Timetable};
/// use weektable::scheduler::TimetableGenerator;
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
/// let mut rng = SmallRng::seed_from_u64(7);
///
/// let outcome = TimetableGenerator::new()
///     .generate(&snapshot, &grid, &mut rng)
///     .unwrap();
/// assert_eq!(outcome.sessions.len(), 3);
///
/// let mut timetable = Timetable::new();
/// timetable.commit(outcome.sessions);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableGenerator {
    lab_attempts: u32,
    lecture_attempts: u32,
    post_lab_gap_minutes: u16,
}

impl TimetableGenerator {
    /// Creates a generator with default budgets (200 lab attempts, 100
    /// lecture attempts, 120-minute post-lab gap).
    pub fn new() -> Self {
        Self {
            lab_attempts: DEFAULT_LAB_ATTEMPTS,
            lecture_attempts: DEFAULT_LECTURE_ATTEMPTS,
            post_lab_gap_minutes: DEFAULT_POST_LAB_GAP_MINUTES,
        }
    }

    /// Sets the retry budget for lab blocks.
    pub fn with_lab_attempts(mut self, attempts: u32) -> Self {
        self.lab_attempts = attempts;
        self
    }

    /// Sets the retry budget for lectures.
    pub fn with_lecture_attempts(mut self, attempts: u32) -> Self {
        self.lecture_attempts = attempts;
        self
    }

    /// Sets the minimum gap between a teacher's lab and their next
    /// lecture on the same day. 0 disables the rule.
    pub fn with_post_lab_gap(mut self, minutes: u16) -> Self {
        self.post_lab_gap_minutes = minutes;
        self
    }

    /// Generates a fresh weekly timetable.
    ///
    /// Returns the placed sessions plus warnings for any task whose
    /// retry budget ran out. Configuration errors (dangling entity
    /// references) abort the call; the caller's committed store is
    /// never touched either way — committing the result is the
    /// caller's single, atomic step.
    pub fn generate<R: Rng>(
        &self,
        snapshot: &EntitySnapshot,
        grid: &SlotGrid,
        rng: &mut R,
    ) -> Result<GenerateOutcome, ConfigurationError> {
        let lab_tasks = self.expand_lab_tasks(snapshot)?;
        let lecture_tasks = self.expand_lecture_tasks(snapshot)?;
        info!(
            "generating timetable: {} lab blocks, {} lectures over {} days x {} slots",
            lab_tasks.len(),
            lecture_tasks.len(),
            grid.days.len(),
            grid.teachable_count()
        );

        let mut outcome = GenerateOutcome::default();
        let mut index = ConflictIndex::new();
        // Latest lab end per (teacher, day), for the post-lab gap rule.
        let mut lab_ends: HashMap<(String, Day), TimeOfDay> = HashMap::new();

        self.place_labs(
            snapshot, grid, rng, lab_tasks, &mut index, &mut lab_ends, &mut outcome,
        );
        self.place_lectures(snapshot, grid, rng, lecture_tasks, &mut index, &lab_ends, &mut outcome);

        info!(
            "generation finished: {} sessions placed, {} tasks unplaced",
            outcome.sessions.len(),
            outcome.unplaced.len()
        );
        Ok(outcome)
    }

    fn expand_lab_tasks<'a>(
        &self,
        snapshot: &'a EntitySnapshot,
    ) -> Result<Vec<LabTask<'a>>, ConfigurationError> {
        let mut tasks = Vec::new();
        for course in snapshot.courses.iter().filter(|c| c.is_lab) {
            let class = snapshot.class_group(&course.class_id)?;
            snapshot.subject(&course.subject_id)?;
            let fixed_room = match &course.lab_classroom_id {
                Some(id) => Some(snapshot.classroom(id)?),
                None => None,
            };
            if course.has_odd_lab_hour() {
                warn!(
                    "course '{}': odd weekly lab hour dropped ({} hours -> {} two-slot blocks)",
                    course.id,
                    course.weekly_sessions,
                    course.lab_blocks()
                );
            }
            for _ in 0..course.lab_blocks() {
                for batch in class.batches() {
                    let teacher_id = snapshot.lab_teacher(course, batch);
                    snapshot.teacher(teacher_id)?;
                    tasks.push(LabTask {
                        course,
                        batch,
                        teacher_id,
                        fixed_room,
                    });
                }
            }
        }
        Ok(tasks)
    }

    fn expand_lecture_tasks<'a>(
        &self,
        snapshot: &'a EntitySnapshot,
    ) -> Result<Vec<LectureTask<'a>>, ConfigurationError> {
        let mut tasks = Vec::new();
        for course in snapshot.courses.iter().filter(|c| !c.is_lab) {
            snapshot.class_group(&course.class_id)?;
            snapshot.subject(&course.subject_id)?;
            let preference = snapshot.teacher(&course.teacher_id)?.preference;
            for _ in 0..course.weekly_sessions {
                tasks.push(LectureTask { course, preference });
            }
        }
        Ok(tasks)
    }

    #[allow(clippy::too_many_arguments)]
    fn place_labs<R: Rng>(
        &self,
        snapshot: &EntitySnapshot,
        grid: &SlotGrid,
        rng: &mut R,
        mut tasks: Vec<LabTask<'_>>,
        index: &mut ConflictIndex,
        lab_ends: &mut HashMap<(String, Day), TimeOfDay>,
        outcome: &mut GenerateOutcome,
    ) {
        tasks.shuffle(rng);
        let lab_rooms = snapshot.lab_rooms();

        for task in &tasks {
            if grid.teachable_count() < LAB_BLOCK_SLOTS
                || (task.fixed_room.is_none() && lab_rooms.is_empty())
            {
                self.report_unplaced(task.course, task.teacher_id, Some(task.batch), outcome);
                continue;
            }
            let max_start = grid.teachable_count() - LAB_BLOCK_SLOTS;

            let mut placed = false;
            for _ in 0..self.lab_attempts {
                let Some(&day) = grid.days.choose(rng) else {
                    break;
                };
                let start = rng.random_range(0..=max_start);
                let Some((start_time, end_time)) = grid.span(start, LAB_BLOCK_SLOTS) else {
                    continue;
                };
                let room = match task.fixed_room {
                    Some(room) => room,
                    None => match lab_rooms.choose(rng) {
                        Some(room) => *room,
                        None => break,
                    },
                };
                let slots: Vec<usize> = (start..start + LAB_BLOCK_SLOTS).collect();
                let claim = SlotClaim {
                    teacher_id: task.teacher_id,
                    classroom_id: &room.id,
                    class_id: &task.course.class_id,
                    batch: Some(task.batch),
                };
                if index.is_free(day, &slots, claim) {
                    index.reserve(day, &slots, claim);
                    lab_ends
                        .entry((task.teacher_id.to_string(), day))
                        .and_modify(|end| *end = (*end).max(end_time))
                        .or_insert(end_time);
                    debug!(
                        "lab '{}' batch {} -> {} {}-{} in {}",
                        task.course.id, task.batch, day, start_time, end_time, room.id
                    );
                    outcome.sessions.push(
                        PlacedSession::new(
                            &task.course.class_id,
                            &task.course.id,
                            task.teacher_id,
                            &room.id,
                            day,
                            start_time,
                            end_time,
                        )
                        .for_batch(task.batch),
                    );
                    placed = true;
                    break;
                }
            }
            if !placed {
                self.report_unplaced(task.course, task.teacher_id, Some(task.batch), outcome);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn place_lectures<R: Rng>(
        &self,
        snapshot: &EntitySnapshot,
        grid: &SlotGrid,
        rng: &mut R,
        mut tasks: Vec<LectureTask<'_>>,
        index: &mut ConflictIndex,
        lab_ends: &HashMap<(String, Day), TimeOfDay>,
        outcome: &mut GenerateOutcome,
    ) {
        tasks.shuffle(rng);
        let theory_rooms = snapshot.theory_rooms();
        let half = grid.teachable_count() / 2;

        for task in &tasks {
            if theory_rooms.is_empty() {
                self.report_unplaced(task.course, &task.course.teacher_id, None, outcome);
                continue;
            }

            let mut placed = false;
            'attempts: for _ in 0..self.lecture_attempts {
                let Some(&day) = grid.days.choose(rng) else {
                    break;
                };
                let mut order: Vec<usize> = (0..grid.teachable_count()).collect();
                order.shuffle(rng);
                // Stable reorder: preferred half first, shuffled within.
                match task.preference {
                    TimePreference::Morning => order.sort_by_key(|&i| i >= half),
                    TimePreference::Afternoon => order.sort_by_key(|&i| i < half),
                    TimePreference::None => {}
                }

                for slot in order {
                    let Some((start_time, end_time)) = grid.span(slot, 1) else {
                        continue;
                    };
                    if self.post_lab_gap_minutes > 0 {
                        if let Some(&lab_end) =
                            lab_ends.get(&(task.course.teacher_id.clone(), day))
                        {
                            if lab_end.minutes_until(start_time) < self.post_lab_gap_minutes {
                                continue;
                            }
                        }
                    }
                    let Some(room) = theory_rooms.choose(rng) else {
                        break 'attempts;
                    };
                    let claim = SlotClaim {
                        teacher_id: &task.course.teacher_id,
                        classroom_id: &room.id,
                        class_id: &task.course.class_id,
                        batch: None,
                    };
                    if index.is_free(day, &[slot], claim) {
                        index.reserve(day, &[slot], claim);
                        debug!(
                            "lecture '{}' -> {} {}-{} in {}",
                            task.course.id, day, start_time, end_time, room.id
                        );
                        outcome.sessions.push(PlacedSession::new(
                            &task.course.class_id,
                            &task.course.id,
                            &task.course.teacher_id,
                            &room.id,
                            day,
                            start_time,
                            end_time,
                        ));
                        placed = true;
                        break 'attempts;
                    }
                }
            }
            if !placed {
                self.report_unplaced(task.course, &task.course.teacher_id, None, outcome);
            }
        }
    }

    fn report_unplaced(
        &self,
        course: &Course,
        teacher_id: &str,
        batch: Option<u8>,
        outcome: &mut GenerateOutcome,
    ) {
        warn!(
            "could not place {} for course '{}' (teacher '{}'{})",
            if batch.is_some() { "lab block" } else { "lecture" },
            course.id,
            teacher_id,
            batch.map(|b| format!(", batch {b}")).unwrap_or_default()
        );
        outcome.unplaced.push(UnplacedTask {
            course_id: course.id.clone(),
            class_id: course.class_id.clone(),
            subject_id: course.subject_id.clone(),
            teacher_id: teacher_id.to_string(),
            batch,
            kind: if batch.is_some() {
                SessionKind::Lab
            } else {
                SessionKind::Lecture
            },
        });
    }
}

impl Default for TimetableGenerator {
    fn default() -> Self {
        Self::new()
    }
}
