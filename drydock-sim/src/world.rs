//! Core simulation world and coordination logic.
//!
//! `SimWorld` owns all mutable simulation state behind a single
//! `Rc<RefCell<..>>`, with handle-based access (`WeakSimWorld`) so
//! providers and futures can reach the world without keeping it alive
//! or fighting the borrow checker.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::{Rc, Weak},
    task::Waker,
    time::Duration,
};

use drydock_core::{SimulationError, SimulationResult};

use crate::events::{Event, EventQueue, ScheduledEvent};
use crate::providers::SimTimeProvider;
use crate::sleep::SleepFuture;

#[derive(Debug)]
struct SimInner {
    current_time: Duration,
    queue: EventQueue,
    next_sequence: u64,

    // Sleep bookkeeping
    next_task_id: u64,
    awakened_tasks: HashSet<u64>,
    task_wakers: HashMap<u64, Waker>,

    events_processed: u64,
}

impl SimInner {
    fn new() -> Self {
        Self {
            current_time: Duration::ZERO,
            queue: EventQueue::new(),
            next_sequence: 0,
            next_task_id: 0,
            awakened_tasks: HashSet::new(),
            task_wakers: HashMap::new(),
            events_processed: 0,
        }
    }
}

/// The central simulation coordinator that manages logical time and event
/// processing.
///
/// Time only advances when [`step`](SimWorld::step) pops a scheduled
/// event; no wall-clock waiting is involved anywhere.
#[derive(Debug)]
pub struct SimWorld {
    inner: Rc<RefCell<SimInner>>,
}

impl SimWorld {
    /// Creates a new simulation world at time zero.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SimInner::new())),
        }
    }

    /// Returns the current simulation time.
    pub fn current_time(&self) -> Duration {
        self.inner.borrow().current_time
    }

    /// Schedules an event to execute after the specified delay from the
    /// current simulation time.
    pub fn schedule_event(&self, event: Event, delay: Duration) {
        let mut inner = self.inner.borrow_mut();
        let scheduled_time = inner.current_time + delay;
        let sequence = inner.next_sequence;
        inner.next_sequence += 1;

        inner
            .queue
            .schedule(ScheduledEvent::new(scheduled_time, event, sequence));
    }

    /// Processes the next scheduled event and advances time to it.
    ///
    /// Returns `true` if more events remain after this one.
    pub fn step(&mut self) -> bool {
        let mut inner = self.inner.borrow_mut();

        if let Some(scheduled_event) = inner.queue.pop_earliest() {
            inner.current_time = scheduled_event.time();
            inner.events_processed += 1;
            Self::process_event(&mut inner, scheduled_event.into_event());
            !inner.queue.is_empty()
        } else {
            false
        }
    }

    /// Processes all scheduled events until the queue is empty.
    pub fn run_until_empty(&mut self) {
        while self.step() {}
    }

    /// Returns `true` if there are events waiting to be processed.
    pub fn has_pending_events(&self) -> bool {
        !self.inner.borrow().queue.is_empty()
    }

    /// Returns the number of events waiting to be processed.
    pub fn pending_event_count(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Returns the number of events processed so far.
    pub fn events_processed(&self) -> u64 {
        self.inner.borrow().events_processed
    }

    /// Returns a future that completes once simulation time has advanced
    /// by `duration`.
    pub fn sleep(&self, duration: Duration) -> SleepFuture {
        let task_id = {
            let mut inner = self.inner.borrow_mut();
            let task_id = inner.next_task_id;
            inner.next_task_id += 1;
            task_id
        };

        self.schedule_event(Event::Timer { task_id }, duration);
        SleepFuture::new(self.downgrade(), task_id)
    }

    /// Creates a weak reference to this simulation world.
    pub fn downgrade(&self) -> WeakSimWorld {
        WeakSimWorld {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Create a time provider backed by this simulation.
    pub fn time_provider(&self) -> SimTimeProvider {
        SimTimeProvider::new(self.downgrade())
    }

    pub(crate) fn is_task_awake(&self, task_id: u64) -> bool {
        self.inner.borrow().awakened_tasks.contains(&task_id)
    }

    pub(crate) fn register_task_waker(&self, task_id: u64, waker: Waker) {
        self.inner.borrow_mut().task_wakers.insert(task_id, waker);
    }

    fn process_event(inner: &mut SimInner, event: Event) {
        match event {
            Event::Timer { task_id } => {
                tracing::trace!(task_id, "processing timer event");
                inner.awakened_tasks.insert(task_id);
                if let Some(waker) = inner.task_wakers.remove(&task_id) {
                    waker.wake();
                }
            }
            Event::Shutdown => {
                tracing::debug!("processing shutdown event, waking all tasks");
                let task_ids: Vec<u64> = inner.task_wakers.keys().copied().collect();
                for task_id in task_ids {
                    inner.awakened_tasks.insert(task_id);
                }
                for (_, waker) in inner.task_wakers.drain() {
                    waker.wake();
                }
            }
        }
    }
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// A non-owning handle to a [`SimWorld`].
///
/// Handles can outlive the world; every operation fails with
/// [`SimulationError::ShutDown`] once the world has been dropped.
#[derive(Debug, Clone)]
pub struct WeakSimWorld {
    inner: Weak<RefCell<SimInner>>,
}

impl WeakSimWorld {
    /// Upgrades to a full [`SimWorld`] handle.
    pub fn upgrade(&self) -> SimulationResult<SimWorld> {
        self.inner
            .upgrade()
            .map(|inner| SimWorld { inner })
            .ok_or(SimulationError::ShutDown)
    }

    /// Returns a sleep future on the underlying world.
    pub fn sleep(&self, duration: Duration) -> SimulationResult<SleepFuture> {
        Ok(self.upgrade()?.sleep(duration))
    }

    /// Returns the current simulation time.
    pub fn now(&self) -> SimulationResult<Duration> {
        Ok(self.upgrade()?.current_time())
    }

    pub(crate) fn is_task_awake(&self, task_id: u64) -> SimulationResult<bool> {
        Ok(self.upgrade()?.is_task_awake(task_id))
    }

    pub(crate) fn register_task_waker(&self, task_id: u64, waker: Waker) -> SimulationResult<()> {
        self.upgrade()?.register_task_waker(task_id, waker);
        Ok(())
    }
}
