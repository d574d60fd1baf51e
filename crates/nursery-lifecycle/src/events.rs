//! Plant notifications and the hook receivers that collect them.
//!
//! A [`Plant`] calls every attached [`PlantObserver`] synchronously, in
//! attachment order, whenever one of the events below happens. Fan-out beyond
//! that (filtering, routing, UI) belongs to the receivers.

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use nursery_common::PlantId;

use crate::lifecycle::LifecycleStage;
use crate::plant::Plant;

/// Events a plant reports to its observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantEvent {
    /// Water was applied.
    Watered,
    /// Fertilizer was applied.
    Fertilized,
    /// Lifecycle state was replaced.
    StateChanged {
        /// Stage before the transition
        from: LifecycleStage,
        /// Stage after the transition
        to: LifecycleStage,
    },
    /// Entered a stage with low health.
    HealthLow,
    /// Entered the dead stage.
    Died,
    /// The attached care strategy ran.
    CareApplied,
}

impl PlantEvent {
    /// The event label observers match on.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Watered => "watered",
            Self::Fertilized => "fertilized",
            Self::StateChanged { .. } => "state_changed",
            Self::HealthLow => "health_low",
            Self::Died => "died",
            Self::CareApplied => "care_applied",
        }
    }

    /// Name of the new stage for state changes.
    #[must_use]
    pub const fn new_state_name(&self) -> Option<&'static str> {
        match self {
            Self::StateChanged { to, .. } => Some(to.display_name()),
            _ => None,
        }
    }
}

/// Receiver side of the plant notification hook.
pub trait PlantObserver: Send + Sync {
    /// Called after `event` happened on `plant`.
    fn on_event(&self, plant: &Plant, event: &PlantEvent);
}

/// A plant event tagged with the plant it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantNotification {
    /// Plant that raised the event
    pub plant_id: PlantId,
    /// Stage the plant was in when observers were called
    pub stage: LifecycleStage,
    /// What happened
    pub event: PlantEvent,
}

impl PlantNotification {
    fn capture(plant: &Plant, event: &PlantEvent) -> Self {
        Self {
            plant_id: plant.id(),
            stage: plant.stage(),
            event: *event,
        }
    }
}

/// Observer that keeps every notification it sees.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Mutex<Vec<PlantNotification>>,
}

impl EventRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<PlantNotification> {
        self.events.lock().clone()
    }

    /// Labels of everything recorded so far, in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|n| n.event.label()).collect()
    }

    /// Number of recorded events with the given label.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|n| n.event.label() == label)
            .count()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Checks if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl PlantObserver for EventRecorder {
    fn on_event(&self, plant: &Plant, event: &PlantEvent) {
        self.events
            .lock()
            .push(PlantNotification::capture(plant, event));
    }
}

/// Bounded channel sink for plant notifications.
///
/// Attach it to any number of plants and drain it from elsewhere.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for publishing notifications
    sender: Sender<PlantNotification>,
    /// Receiver for collecting notifications
    receiver: Receiver<PlantNotification>,
    /// Channel capacity
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes a notification to the bus.
    pub fn publish(&self, notification: PlantNotification) {
        // Non-blocking send - if full, the notification is dropped
        if self.sender.try_send(notification).is_err() {
            tracing::trace!("event bus full, dropping notification");
        }
    }

    /// Drains all pending notifications.
    pub fn drain(&self) -> Vec<PlantNotification> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending notifications.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl PlantObserver for EventBus {
    fn on_event(&self, plant: &Plant, event: &PlantEvent) {
        self.publish(PlantNotification::capture(plant, event));
    }
}
