//! Deferred task scheduling on the UI thread.
//!
//! The scheduler holds one-shot callbacks that should run once a deadline has
//! passed. It never reads the clock itself: the host passes the current frame
//! timestamp into [`TaskScheduler::schedule_once`] and
//! [`TaskScheduler::process_ready`], which keeps animation timing
//! deterministic and testable. Each task receives the instant it was
//! processed at, which may be later than its deadline.
//!
//! # Example
//!
//! ```
//! use horizon_steps_core::TaskScheduler;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//!
//! let scheduler = TaskScheduler::new();
//! let fired = Arc::new(AtomicBool::new(false));
//! let start = Instant::now();
//!
//! let flag = fired.clone();
//! scheduler.schedule_once(start, Duration::from_millis(250), move |_now| {
//!     flag.store(true, Ordering::SeqCst);
//! });
//!
//! assert_eq!(scheduler.time_until_next(start), Some(Duration::from_millis(250)));
//! assert_eq!(scheduler.process_ready(start + Duration::from_millis(100)), 0);
//! assert_eq!(scheduler.process_ready(start + Duration::from_millis(250)), 1);
//! assert!(fired.load(Ordering::SeqCst));
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::logging::targets;

/// A boxed task closure, called with the instant it is processed at.
type BoxedScheduledTask = Box<dyn FnOnce(Instant) + Send + 'static>;

/// An entry in the scheduler queue (min-heap by execution time).
struct ScheduledTask {
    /// When this task should execute.
    run_at: Instant,
    /// Insertion sequence, used to keep equal deadlines in FIFO order.
    sequence: u64,
    task: BoxedScheduledTask,
}

impl PartialEq for ScheduledTask {
    fn eq(&self, other: &Self) -> bool {
        self.run_at == other.run_at && self.sequence == other.sequence
    }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTask {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .run_at
            .cmp(&self.run_at)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Default)]
struct SchedulerInner {
    queue: BinaryHeap<ScheduledTask>,
    next_sequence: u64,
}

impl SchedulerInner {
    fn insert(&mut self, run_at: Instant, task: BoxedScheduledTask) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(ScheduledTask {
            run_at,
            sequence,
            task,
        });
        sequence
    }

    /// Remove every task due at `now`, in deadline order.
    fn take_ready(&mut self, now: Instant) -> Vec<ScheduledTask> {
        let mut ready = Vec::new();
        while self.queue.peek().is_some_and(|entry| entry.run_at <= now) {
            if let Some(entry) = self.queue.pop() {
                ready.push(entry);
            }
        }
        ready
    }
}

/// Manages one-shot deferred tasks.
///
/// Tasks are ordered by deadline, then by scheduling order. Ready tasks are
/// removed from the scheduler before they run, so a task may schedule new
/// work without deadlocking. Tasks cannot be cancelled; a task that may have
/// been superseded checks for that itself when it runs.
pub struct TaskScheduler {
    inner: Mutex<SchedulerInner>,
}

static_assertions::assert_impl_all!(TaskScheduler: Send, Sync);

impl TaskScheduler {
    /// Create a new task scheduler.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SchedulerInner::default()),
        }
    }

    /// Schedule a task to execute `delay` after `now`.
    pub fn schedule_once<F>(&self, now: Instant, delay: Duration, task: F)
    where
        F: FnOnce(Instant) + Send + 'static,
    {
        self.schedule_at(now + delay, task);
    }

    /// Schedule a task to execute at a specific instant.
    ///
    /// An instant in the past runs on the next call to
    /// [`process_ready`](Self::process_ready).
    pub fn schedule_at<F>(&self, instant: Instant, task: F)
    where
        F: FnOnce(Instant) + Send + 'static,
    {
        let sequence = self.inner.lock().insert(instant, Box::new(task));
        tracing::trace!(target: targets::SCHEDULER, sequence, "task scheduled");
    }

    /// Get the duration from `now` until the next task is due, if any.
    ///
    /// A task that is already due reports [`Duration::ZERO`].
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.inner
            .lock()
            .queue
            .peek()
            .map(|entry| entry.run_at.saturating_duration_since(now))
    }

    /// Run every task whose deadline is at or before `now`, passing it `now`.
    ///
    /// Returns the number of tasks that were executed. Tasks scheduled by a
    /// running task are not considered until the next call.
    #[tracing::instrument(skip(self), target = "horizon_steps_core::scheduler", level = "trace")]
    pub fn process_ready(&self, now: Instant) -> usize {
        let ready = self.inner.lock().take_ready(now);
        let executed = ready.len();

        for entry in ready {
            tracing::trace!(target: targets::SCHEDULER, sequence = entry.sequence, "executing scheduled task");
            (entry.task)(now);
        }

        executed
    }

    /// Get the number of pending tasks.
    pub fn active_count(&self) -> usize {
        self.inner.lock().queue.len()
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("active_count", &self.active_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_schedule_once() {
        let scheduler = TaskScheduler::new();
        let executed = Arc::new(AtomicUsize::new(0));
        let executed_clone = executed.clone();
        let start = Instant::now();

        scheduler.schedule_once(start, ms(10), move |_| {
            executed_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(scheduler.active_count(), 1);

        assert_eq!(scheduler.process_ready(start), 0);
        assert_eq!(executed.load(Ordering::SeqCst), 0);

        assert_eq!(scheduler.process_ready(start + ms(10)), 1);
        assert_eq!(executed.load(Ordering::SeqCst), 1);

        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(scheduler.process_ready(start + ms(20)), 0);
    }

    #[test]
    fn test_task_receives_processing_instant() {
        let scheduler = TaskScheduler::new();
        let seen = Arc::new(Mutex::new(None));
        let start = Instant::now();

        let sink = seen.clone();
        scheduler.schedule_once(start, ms(10), move |now| *sink.lock() = Some(now));

        scheduler.process_ready(start + ms(35));
        assert_eq!(*seen.lock(), Some(start + ms(35)));
    }

    #[test]
    fn test_multiple_tasks_order() {
        let scheduler = TaskScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let start = Instant::now();

        for (delay, label) in [(30, 3), (10, 1), (20, 2), (10, 11)] {
            let order = order.clone();
            scheduler.schedule_once(start, ms(delay), move |_| order.lock().push(label));
        }

        scheduler.process_ready(start + ms(35));
        assert_eq!(*order.lock(), vec![1, 11, 2, 3]);
    }

    #[test]
    fn test_time_until_next() {
        let scheduler = TaskScheduler::new();
        let start = Instant::now();
        assert!(scheduler.time_until_next(start).is_none());

        scheduler.schedule_once(start, ms(100), |_| {});
        scheduler.schedule_once(start, ms(10), |_| {});
        assert_eq!(scheduler.time_until_next(start), Some(ms(10)));

        scheduler.process_ready(start + ms(10));
        assert_eq!(scheduler.time_until_next(start + ms(10)), Some(ms(90)));
        assert_eq!(scheduler.time_until_next(start + ms(200)), Some(Duration::ZERO));
    }

    #[test]
    fn test_task_can_schedule_more_work() {
        let scheduler = Arc::new(TaskScheduler::new());
        let executed = Arc::new(AtomicUsize::new(0));
        let start = Instant::now();

        let inner_scheduler = scheduler.clone();
        let inner_executed = executed.clone();
        scheduler.schedule_once(start, ms(5), move |now| {
            inner_executed.fetch_add(1, Ordering::SeqCst);
            let executed = inner_executed.clone();
            inner_scheduler.schedule_once(now, ms(5), move |_| {
                executed.fetch_add(1, Ordering::SeqCst);
            });
        });

        assert_eq!(scheduler.process_ready(start + ms(5)), 1);
        assert_eq!(scheduler.time_until_next(start + ms(5)), Some(ms(5)));
        assert_eq!(scheduler.process_ready(start + ms(10)), 1);
        assert_eq!(executed.load(Ordering::SeqCst), 2);
    }
}
