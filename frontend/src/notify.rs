use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_TOAST_MILLIS: i64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Dismissible, expires on its own.
    Toast,
    /// Stays until the user dismisses it.
    Alert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub status: Status,
    pub delivery: Delivery,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub duration: Duration,
}

impl Notification {
    pub fn toast(status: Status, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            status,
            delivery: Delivery::Toast,
            title: title.into(),
            description: None,
            created_at: Utc::now(),
            duration: Duration::milliseconds(DEFAULT_TOAST_MILLIS),
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            delivery: Delivery::Alert,
            ..Self::toast(Status::Error, message)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.delivery == Delivery::Toast && now >= self.created_at + self.duration
    }
}

/// Queue of notifications currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    /// Queues `notification` and returns the id it was given.
    pub fn push(&mut self, mut notification: Notification) -> u64 {
        self.next_id += 1;
        notification.id = self.next_id;
        self.items.push(notification);
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn prune_expired(&mut self, now: DateTime<Utc>) {
        self.items.retain(|n| !n.is_expired(now));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
