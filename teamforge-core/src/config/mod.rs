//! Configuration types for teamforge.
//!
//! These types represent the validated runtime configuration used by the
//! server. The actual config loading/parsing is handled by the server crate.

mod mail;
mod scheduler;

pub use mail::{MailConfig, SmtpConfig};
pub use scheduler::{DEFAULT_TICK_INTERVAL, SchedulerConfig};
