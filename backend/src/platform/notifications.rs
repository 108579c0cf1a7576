//! # Notification Service
//!
//! Contract for the platform's local-notification facility, plus an
//! in-process implementation that keeps pending reminders in memory.
//!
//! The platform guarantees at most one pending request per identifier:
//! scheduling again with the same identifier replaces the earlier request.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Which kinds of interruption the app asks permission for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationOptions {
    pub alert: bool,
    pub sound: bool,
    pub badge: bool,
}

impl AuthorizationOptions {
    pub const ALL: AuthorizationOptions = AuthorizationOptions {
        alert: true,
        sound: true,
        badge: true,
    };

    fn is_empty(&self) -> bool {
        !(self.alert || self.sound || self.badge)
    }
}

/// Wall-clock components a calendar trigger fires at, in the device's local time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReminderTrigger {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl ReminderTrigger {
    pub fn from_naive(date_time: NaiveDateTime) -> Self {
        Self {
            year: date_time.year(),
            month: date_time.month(),
            day: date_time.day(),
            hour: date_time.hour(),
            minute: date_time.minute(),
        }
    }

    /// `None` when the components do not form a real date and time
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        self.date()?.and_hms_opt(self.hour, self.minute, 0)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// A one-shot, non-repeating notification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    /// Delivery identifier; one pending request per identifier
    pub identifier: String,
    pub trigger: ReminderTrigger,
    pub title: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Notifications are not authorized")]
    NotAuthorized,
    #[error("Invalid trigger: {0:?}")]
    InvalidTrigger(ReminderTrigger),
    #[error("Notification service error: {0}")]
    Platform(String),
}

/// Trait defining the interface to the platform notification service
pub trait NotificationService: Send + Sync {
    /// Ask the user for permission to deliver notifications
    fn request_authorization(&self, options: AuthorizationOptions) -> bool;

    /// Register a one-shot notification, replacing any pending request
    /// with the same identifier
    fn schedule_one_shot(&self, request: &ReminderRequest) -> Result<(), NotificationError>;
}

/// Notification center that keeps pending requests in memory.
///
/// Requests whose trigger is already in the past are kept and handed out by
/// the next `take_due` call, i.e. delivered as soon as anyone looks.
#[derive(Debug)]
pub struct InMemoryNotificationCenter {
    grants_authorization: bool,
    authorized: AtomicBool,
    schedule_calls: AtomicUsize,
    pending: Mutex<BTreeMap<String, ReminderRequest>>,
    delivered: Mutex<Vec<ReminderRequest>>,
}

impl InMemoryNotificationCenter {
    /// A center that will grant (or deny) authorization once asked
    pub fn new(grants_authorization: bool) -> Self {
        Self {
            grants_authorization,
            authorized: AtomicBool::new(false),
            schedule_calls: AtomicUsize::new(0),
            pending: Mutex::new(BTreeMap::new()),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// A center that has already been authorized
    pub fn authorized() -> Self {
        let center = Self::new(true);
        center.authorized.store(true, Ordering::SeqCst);
        center
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    /// Number of `schedule_one_shot` calls, successful or not
    pub fn schedule_call_count(&self) -> usize {
        self.schedule_calls.load(Ordering::SeqCst)
    }

    pub fn pending_requests(&self) -> Vec<ReminderRequest> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .cloned()
            .collect()
    }

    pub fn pending_for(&self, identifier: &str) -> Option<ReminderRequest> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(identifier)
            .cloned()
    }

    /// Remove and return every pending request due at or before `now`,
    /// ordered by trigger time
    pub fn take_due(&self, now: NaiveDateTime) -> Vec<ReminderRequest> {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let due_ids: Vec<String> = pending
            .iter()
            .filter(|(_, request)| request.trigger.to_naive().map_or(false, |at| at <= now))
            .map(|(id, _)| id.clone())
            .collect();

        let mut due: Vec<ReminderRequest> = due_ids
            .iter()
            .filter_map(|id| pending.remove(id))
            .collect();
        due.sort_by_key(|request| request.trigger);

        if !due.is_empty() {
            info!("Delivering {} due reminder(s)", due.len());
            self.delivered
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .extend(due.iter().cloned());
        }
        due
    }

    pub fn delivered(&self) -> Vec<ReminderRequest> {
        self.delivered
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl NotificationService for InMemoryNotificationCenter {
    fn request_authorization(&self, options: AuthorizationOptions) -> bool {
        let granted = self.grants_authorization && !options.is_empty();
        self.authorized.store(granted, Ordering::SeqCst);
        debug!("Notification authorization requested: {:?}, granted={}", options, granted);
        granted
    }

    fn schedule_one_shot(&self, request: &ReminderRequest) -> Result<(), NotificationError> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);

        if !self.is_authorized() {
            warn!("Dropping reminder '{}': not authorized", request.identifier);
            return Err(NotificationError::NotAuthorized);
        }
        if request.trigger.to_naive().is_none() {
            return Err(NotificationError::InvalidTrigger(request.trigger));
        }

        let mut pending = self
            .pending
            .lock()
            .map_err(|_| NotificationError::Platform("pending queue lock poisoned".to_string()))?;
        if pending.insert(request.identifier.clone(), request.clone()).is_some() {
            debug!("Replaced pending reminder '{}'", request.identifier);
        }
        Ok(())
    }
}
