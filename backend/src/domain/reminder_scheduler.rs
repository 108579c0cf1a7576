//! # Reminder Scheduler
//!
//! Computes when an item's expiry reminder fires and hands a one-shot
//! request to the notification service.
//!
//! The trigger is the expiry's calendar day minus `lead_days`, at
//! `hour:minute` local time. The expiry's own time of day never matters.
//! The request identifier is the item id, so re-scheduling an item replaces
//! its pending reminder instead of adding a second one.

use chrono::{DateTime, Days, Local, TimeZone};
use log::{info, warn};
use std::sync::Arc;

use crate::config::ReminderSettings;
use crate::domain::commands::items::ReminderOutcome;
use crate::domain::models::FoodItem;
use crate::platform::{NotificationService, ReminderRequest, ReminderTrigger};

/// Trigger for an expiry observed in `expiry`'s time zone.
/// `None` only when the date arithmetic runs off chrono's calendar.
pub fn reminder_trigger<Tz: TimeZone>(
    expiry: &DateTime<Tz>,
    settings: &ReminderSettings,
) -> Option<ReminderTrigger> {
    let trigger_day = expiry
        .date_naive()
        .checked_sub_days(Days::new(u64::from(settings.lead_days)))?;
    let trigger_at = trigger_day.and_hms_opt(settings.hour, settings.minute, 0)?;
    Some(ReminderTrigger::from_naive(trigger_at))
}

/// Registers expiry reminders with the notification service
#[derive(Clone)]
pub struct ReminderScheduler {
    notifications: Arc<dyn NotificationService>,
    settings: ReminderSettings,
}

impl ReminderScheduler {
    pub fn new(notifications: Arc<dyn NotificationService>, settings: ReminderSettings) -> Self {
        Self {
            notifications,
            settings,
        }
    }

    pub fn settings(&self) -> &ReminderSettings {
        &self.settings
    }

    /// Trigger for `item` in the device's local calendar
    pub fn trigger_for(&self, item: &FoodItem) -> Option<ReminderTrigger> {
        self.trigger_for_in(item, &Local)
    }

    pub fn trigger_for_in<Tz: TimeZone>(
        &self,
        item: &FoodItem,
        tz: &Tz,
    ) -> Option<ReminderTrigger> {
        reminder_trigger(&item.expiry_date.with_timezone(tz), &self.settings)
    }

    /// The request that `schedule` would send for `item`
    pub fn request_for(&self, item: &FoodItem) -> Option<ReminderRequest> {
        let trigger = self.trigger_for(item)?;
        Some(ReminderRequest {
            identifier: item.id.to_string(),
            trigger,
            title: self.settings.title.clone(),
            body: self.settings.body_for(&item.name),
        })
    }

    /// Ask the notification service for a reminder. Failures are logged and
    /// reported in the outcome; they never affect the caller's operation.
    pub fn schedule(&self, item: &FoodItem) -> ReminderOutcome {
        let Some(request) = self.request_for(item) else {
            warn!("Cannot compute a reminder time for item {} ({})", item.id, item.name);
            return ReminderOutcome::Unschedulable;
        };

        match self.notifications.schedule_one_shot(&request) {
            Ok(()) => {
                info!(
                    "Scheduled reminder for '{}' at {:04}-{:02}-{:02} {:02}:{:02}",
                    item.name,
                    request.trigger.year,
                    request.trigger.month,
                    request.trigger.day,
                    request.trigger.hour,
                    request.trigger.minute
                );
                ReminderOutcome::Scheduled(request.trigger)
            }
            Err(e) => {
                warn!("Reminder for '{}' not scheduled: {}", item.name, e);
                ReminderOutcome::Rejected(e)
            }
        }
    }
}
