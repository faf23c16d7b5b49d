use chrono_tz::Tz;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// How often the reminder scheduler wakes up to scan for due
    /// reminders, in millis
    pub reminder_tick_interval: i64,
    /// Time zone that decides where "today" ends, i.e. how long a
    /// "snooze for today" lasts. Deployments spanning regions pick one
    /// reference zone instead of guessing per user.
    pub reference_timezone: Tz,
    /// Upper bound on concurrent per-user deliveries within one alert
    pub dispatch_concurrency: usize,
    /// Webhook gateway receiving rendered email messages. When unset the
    /// email channel writes to the log instead of calling out.
    pub email_webhook_url: Option<String>,
    /// Webhook gateway receiving rendered SMS messages. Same fallback
    /// behavior as for email.
    pub sms_webhook_url: Option<String>,
    /// Shared key attached to gateway requests as the
    /// `klaxon-webhook-key` header
    pub webhook_key: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let default_tick_minutes = "120";
        let tick_minutes =
            std::env::var("REMINDER_TICK_INTERVAL_MINUTES").unwrap_or(default_tick_minutes.into());
        let tick_minutes = match tick_minutes.parse::<i64>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => {
                warn!(
                    "The given REMINDER_TICK_INTERVAL_MINUTES: {} is not valid, falling back to the default: {}.",
                    tick_minutes, default_tick_minutes
                );
                default_tick_minutes.parse::<i64>().unwrap()
            }
        };

        let reference_timezone = match std::env::var("REFERENCE_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given REFERENCE_TIMEZONE: {} is not a valid IANA time zone, falling back to UTC.",
                        tz
                    );
                    chrono_tz::UTC
                }
            },
            Err(_) => {
                info!("Did not find REFERENCE_TIMEZONE environment variable. Using UTC.");
                chrono_tz::UTC
            }
        };

        let default_concurrency = "16";
        let dispatch_concurrency =
            std::env::var("DISPATCH_CONCURRENCY").unwrap_or(default_concurrency.into());
        let dispatch_concurrency = match dispatch_concurrency.parse::<usize>() {
            Ok(limit) if limit > 0 => limit,
            _ => {
                warn!(
                    "The given DISPATCH_CONCURRENCY: {} is not valid, falling back to the default: {}.",
                    dispatch_concurrency, default_concurrency
                );
                default_concurrency.parse::<usize>().unwrap()
            }
        };

        Self {
            reminder_tick_interval: tick_minutes * 60 * 1000,
            reference_timezone,
            dispatch_concurrency,
            email_webhook_url: std::env::var("EMAIL_WEBHOOK_URL").ok(),
            sms_webhook_url: std::env::var("SMS_WEBHOOK_URL").ok(),
            webhook_key: std::env::var("WEBHOOK_API_KEY").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
