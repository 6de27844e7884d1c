//! Event scheduling for the simulation engine.
//!
//! Events are processed in time order; events at the same instant are
//! ordered by a monotonically increasing sequence number so a run is
//! fully deterministic.

use std::{cmp::Ordering, collections::BinaryHeap, time::Duration};

/// Events that can be scheduled in the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Timer event for waking a sleeping task.
    Timer {
        /// The unique identifier for the task to wake.
        task_id: u64,
    },

    /// Shutdown event that wakes all sleeping tasks for graceful
    /// termination.
    Shutdown,
}

/// An event scheduled for execution at a specific simulation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    time: Duration,
    event: Event,
    sequence: u64,
}

impl ScheduledEvent {
    /// Creates a new scheduled event.
    pub fn new(time: Duration, event: Event, sequence: u64) -> Self {
        Self {
            time,
            event,
            sequence,
        }
    }

    /// Returns the scheduled execution time.
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Returns a reference to the event.
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Consumes the scheduled event and returns the event.
    pub fn into_event(self) -> Event {
        self.event
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both comparisons so the
        // earliest time (then the lowest sequence) pops first.
        match other.time.cmp(&self.time) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            ordering => ordering,
        }
    }
}

/// A priority queue of scheduled events, earliest first.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<ScheduledEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Schedules an event for execution.
    pub fn schedule(&mut self, event: ScheduledEvent) {
        self.heap.push(event);
    }

    /// Removes and returns the earliest scheduled event.
    pub fn pop_earliest(&mut self) -> Option<ScheduledEvent> {
        self.heap.pop()
    }

    /// Returns `true` if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of events in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_pop_in_time_order() {
        let mut queue = EventQueue::new();

        queue.schedule(ScheduledEvent::new(
            Duration::from_millis(300),
            Event::Timer { task_id: 3 },
            2,
        ));
        queue.schedule(ScheduledEvent::new(
            Duration::from_millis(100),
            Event::Timer { task_id: 1 },
            0,
        ));
        queue.schedule(ScheduledEvent::new(
            Duration::from_millis(200),
            Event::Timer { task_id: 2 },
            1,
        ));

        let first = queue.pop_earliest().expect("queue should not be empty");
        assert_eq!(first.time(), Duration::from_millis(100));
        assert_eq!(first.event(), &Event::Timer { task_id: 1 });

        let second = queue.pop_earliest().expect("queue should not be empty");
        assert_eq!(second.time(), Duration::from_millis(200));

        let third = queue.pop_earliest().expect("queue should not be empty");
        assert_eq!(third.into_event(), Event::Timer { task_id: 3 });

        assert!(queue.is_empty());
    }

    #[test]
    fn same_time_events_pop_in_sequence_order() {
        let mut queue = EventQueue::new();
        let same_time = Duration::from_millis(100);

        queue.schedule(ScheduledEvent::new(same_time, Event::Timer { task_id: 3 }, 2));
        queue.schedule(ScheduledEvent::new(same_time, Event::Timer { task_id: 1 }, 0));
        queue.schedule(ScheduledEvent::new(same_time, Event::Shutdown, 1));

        assert_eq!(
            queue.pop_earliest().expect("queue should not be empty").event(),
            &Event::Timer { task_id: 1 }
        );
        assert_eq!(queue.pop_earliest().expect("queue should not be empty").event(), &Event::Shutdown);
        assert_eq!(
            queue.pop_earliest().expect("queue should not be empty").event(),
            &Event::Timer { task_id: 3 }
        );
    }

    #[test]
    fn len_tracks_scheduling() {
        let mut queue = EventQueue::new();
        assert_eq!(queue.len(), 0);
        queue.schedule(ScheduledEvent::new(
            Duration::from_secs(1),
            Event::Shutdown,
            0,
        ));
        assert_eq!(queue.len(), 1);
        queue.pop_earliest();
        assert!(queue.is_empty());
    }
}
