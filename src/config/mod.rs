//! Configuration management for talentsync
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. The sender identity, its credential and the
//! candidate store location are required; everything else has a default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::notifications::message::{DEFAULT_SIGNATURE, DEFAULT_SUBJECT, DEFAULT_SUPPORT_LINK};
use crate::notifications::DEFAULT_MAX_CONCURRENT_SENDS;
use crate::scheduler::calendar::{
    DEFAULT_DAY_END, DEFAULT_DAY_START, DEFAULT_SLOT_MINUTES, DEFAULT_ZONE_LABEL,
};
use crate::scheduler::clock::DEFAULT_UTC_OFFSET_MINUTES;
use crate::scheduler::{
    BusinessDays, FixedOffsetClock, HolidayList, SchedulerResult, SlotAllocator, WeekendRule,
    WorkWeek, WorkingHours, DEFAULT_LEAD_DAYS,
};
use crate::server::ServerConfig;

/// Default candidate collection
pub const DEFAULT_COLLECTION: &str = "selected";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Candidate store configuration
    pub store: StoreConfig,

    /// Sender identity and transport
    pub sender: SenderConfig,

    /// Message content
    #[serde(default)]
    pub message: MessageConfig,

    /// Working hours and business days
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Candidate store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database path
    pub sqlite_path: PathBuf,

    /// Collection scheduled when a trigger names none
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

/// Delivery transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Implicit-TLS SMTP relay
    #[default]
    Smtp,
    /// HTTP mail relay
    Webhook,
}

impl std::str::FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smtp" => Ok(Self::Smtp),
            "webhook" => Ok(Self::Webhook),
            other => Err(format!("unknown transport '{other}' (expected smtp or webhook)")),
        }
    }
}

/// Sender identity, credential and transport settings
#[derive(Clone, Serialize, Deserialize)]
pub struct SenderConfig {
    /// Sender address, also the SMTP login
    pub email: String,

    /// SMTP password or webhook bearer token
    pub password: String,

    /// Name used in the From header and the signature
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// SMTP relay host
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP relay port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Transport used for delivery
    #[serde(default)]
    pub transport: TransportKind,

    /// Relay endpoint for the webhook transport
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Per-send timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sends in flight at once
    #[serde(default = "default_max_concurrent_sends")]
    pub max_concurrent_sends: usize,
}

fn default_display_name() -> String {
    DEFAULT_SIGNATURE.to_string()
}

fn default_smtp_host() -> String {
    String::from("smtp.gmail.com")
}

fn default_smtp_port() -> u16 {
    465
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_concurrent_sends() -> usize {
    DEFAULT_MAX_CONCURRENT_SENDS
}

impl SenderConfig {
    /// Sender with default transport settings
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: default_display_name(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            transport: TransportKind::Smtp,
            webhook_url: None,
            timeout_secs: default_timeout_secs(),
            max_concurrent_sends: default_max_concurrent_sends(),
        }
    }

    /// Per-send timeout as Duration
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for SenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("transport", &self.transport)
            .field("webhook_url", &self.webhook_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_concurrent_sends", &self.max_concurrent_sends)
            .finish()
    }
}

/// Message content configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Subject line
    pub subject: String,

    /// Link for candidate questions
    pub support_link: String,

    /// Custom Handlebars template replacing the embedded one
    pub template_path: Option<PathBuf>,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            support_link: DEFAULT_SUPPORT_LINK.to_string(),
            template_path: None,
        }
    }
}

/// Working hours and business-day configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// First slot of the day (HH:MM)
    pub day_start: String,

    /// Last slot of the day (HH:MM), inclusive
    pub day_end: String,

    /// Slot length in minutes
    pub slot_minutes: i64,

    /// Calendar days between the trigger and the first interview day
    pub lead_days: i64,

    /// Label appended to slot times
    pub zone_label: String,

    /// Offset of the label's zone from UTC, in minutes
    pub utc_offset_minutes: i32,

    /// Weekday names never used for interviews
    pub non_working_days: Vec<String>,

    /// Dates never used for interviews (YYYY-MM-DD)
    pub holidays: Vec<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            day_start: DEFAULT_DAY_START.to_string(),
            day_end: DEFAULT_DAY_END.to_string(),
            slot_minutes: DEFAULT_SLOT_MINUTES,
            lead_days: DEFAULT_LEAD_DAYS,
            zone_label: DEFAULT_ZONE_LABEL.to_string(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            non_working_days: vec![String::from("Sat"), String::from("Sun")],
            holidays: Vec::new(),
        }
    }
}

impl ScheduleConfig {
    /// Working hours described by this section
    pub fn working_hours(&self) -> SchedulerResult<WorkingHours> {
        WorkingHours::parse(
            &self.day_start,
            &self.day_end,
            self.slot_minutes,
            self.zone_label.as_str(),
        )
    }

    /// Business-day rule described by this section
    pub fn business_days(&self) -> SchedulerResult<BusinessDays> {
        let weekend = WeekendRule::parse(&self.non_working_days)?;
        let holidays = HolidayList::parse(&self.holidays)?;
        Ok(BusinessDays::new(WorkWeek::new(weekend, holidays)))
    }

    /// Allocator described by this section
    pub fn allocator(&self) -> SchedulerResult<SlotAllocator> {
        SlotAllocator::new(self.working_hours()?, self.business_days()?, self.lead_days)
    }

    /// Clock for the configured offset
    pub fn clock(&self) -> SchedulerResult<FixedOffsetClock> {
        FixedOffsetClock::new(self.utc_offset_minutes)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => anyhow::bail!("{name} is not set"),
    }
}

fn env_list(name: &str) -> Option<Vec<String>> {
    std::env::var(name).ok().map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// `SENDER_EMAIL`, `EMAIL_PASSWORD` and `TALENTSYNC_STORE_PATH` are
    /// required.
    pub fn from_env() -> Result<Self> {
        let email = required_env("SENDER_EMAIL")?;
        let password = required_env("EMAIL_PASSWORD")?;
        let sqlite_path = PathBuf::from(required_env("TALENTSYNC_STORE_PATH")?);

        let collection =
            std::env::var("TALENTSYNC_COLLECTION").unwrap_or_else(|_| default_collection());

        let mut sender = SenderConfig::new(email, password);

        if let Ok(name) = std::env::var("SENDER_NAME") {
            sender.display_name = name;
        }

        if let Ok(host) = std::env::var("TALENTSYNC_SMTP_HOST") {
            sender.smtp_host = host;
        }

        if let Some(port) = std::env::var("TALENTSYNC_SMTP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
        {
            sender.smtp_port = port;
        }

        if let Ok(transport) = std::env::var("TALENTSYNC_TRANSPORT") {
            sender.transport = transport.parse().map_err(anyhow::Error::msg)?;
        }

        sender.webhook_url = std::env::var("TALENTSYNC_WEBHOOK_URL").ok();

        if let Some(limit) = std::env::var("TALENTSYNC_MAX_CONCURRENT_SENDS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            sender.max_concurrent_sends = limit;
        }

        let mut schedule = ScheduleConfig::default();

        if let Some(days) = env_list("TALENTSYNC_NON_WORKING_DAYS") {
            schedule.non_working_days = days;
        }

        if let Some(holidays) = env_list("TALENTSYNC_HOLIDAYS") {
            schedule.holidays = holidays;
        }

        let mut server = ServerConfig::default();

        if let Ok(addr) = std::env::var("TALENTSYNC_BIND_ADDRESS") {
            server.bind_address = addr
                .parse()
                .with_context(|| format!("Invalid TALENTSYNC_BIND_ADDRESS: {addr}"))?;
        }

        let log_level =
            std::env::var("TALENTSYNC_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("TALENTSYNC_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            store: StoreConfig {
                sqlite_path,
                collection,
            },
            sender,
            message: MessageConfig::default(),
            schedule,
            server,
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise from the environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.sender.email.trim().is_empty() {
            anyhow::bail!("sender email is required");
        }

        if self.sender.password.is_empty() {
            anyhow::bail!("sender password is required");
        }

        if self.store.sqlite_path.as_os_str().is_empty() {
            anyhow::bail!("store sqlite_path is required");
        }

        if self.store.collection.trim().is_empty() {
            anyhow::bail!("store collection cannot be empty");
        }

        if self.sender.transport == TransportKind::Webhook && self.sender.webhook_url.is_none() {
            anyhow::bail!("webhook transport requires sender.webhook_url");
        }

        if self.sender.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }

        if self.sender.max_concurrent_sends == 0 {
            anyhow::bail!("max_concurrent_sends must be greater than 0");
        }

        self.schedule
            .allocator()
            .context("Invalid schedule configuration")?;
        self.schedule
            .clock()
            .context("Invalid schedule configuration")?;
        self.server.validate().context("Invalid server configuration")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            store: StoreConfig {
                sqlite_path: PathBuf::from("data/candidates.db"),
                collection: default_collection(),
            },
            sender: SenderConfig::new("hr@example.com", "app-password"),
            message: MessageConfig::default(),
            schedule: ScheduleConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_missing_credentials() {
        let mut config = valid_config();
        config.sender.password = String::new();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.sender.email = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_webhook_requires_url() {
        let mut config = valid_config();
        config.sender.transport = TransportKind::Webhook;
        assert!(config.validate().is_err());

        config.sender.webhook_url = Some("https://relay.example.com/send".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_schedule() {
        let mut config = valid_config();
        config.schedule.day_end = String::from("08:00");
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("Invalid schedule configuration"));
    }

    #[test]
    fn test_deserialized_full_week_off_is_rejected() {
        let schedule: ScheduleConfig = toml::from_str(
            r#"non_working_days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]"#,
        )
        .unwrap();

        assert!(matches!(
            schedule.business_days(),
            Err(crate::scheduler::SchedulerError::NoBusinessDays)
        ));
        assert!(schedule.allocator().is_err());
    }

    #[test]
    fn test_schedule_defaults() {
        let schedule = ScheduleConfig::default();
        assert_eq!(schedule.working_hours().unwrap().slots_per_day(), 17);
        assert_eq!(schedule.allocator().unwrap().lead_time().num_days(), 2);
    }

    #[test]
    fn test_transport_parse() {
        assert_eq!("SMTP".parse::<TransportKind>(), Ok(TransportKind::Smtp));
        assert_eq!("webhook".parse::<TransportKind>(), Ok(TransportKind::Webhook));
        assert!("pigeon".parse::<TransportKind>().is_err());
    }

    #[test]
    fn test_sender_debug_redacts_password() {
        let sender = SenderConfig::new("hr@example.com", "hunter2");
        assert!(!format!("{sender:?}").contains("hunter2"));
        assert_eq!(sender.timeout(), Duration::from_secs(30));
    }
}
