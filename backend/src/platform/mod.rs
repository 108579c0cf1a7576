//! Platform capabilities the core calls into but does not own.

pub mod notifications;
pub mod photos;

pub use notifications::{
    AuthorizationOptions, InMemoryNotificationCenter, NotificationError, NotificationService,
    ReminderRequest, ReminderTrigger,
};
pub use photos::{FilePhotoPicker, PhotoPicker};
