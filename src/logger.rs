use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, Metadata, Record};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::config::{AwsConfig, ImageHandlerConfig, TextHandlerConfig};

static BEAUTIFUL_LOGGER: Lazy<BeautifulLogger> = Lazy::new(BeautifulLogger::new);

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    BEAUTIFUL_LOGGER.update_config(config.clone());

    if let Err(e) = log::set_logger(&*BEAUTIFUL_LOGGER) {
        return Err(format!("Failed to set logger: {:?}", e));
    }

    log::set_max_level(config.min_level.to_log_level_filter());
    Ok(())
}

/// Returns `emoji` when the active config shows emojis, otherwise "".
pub fn badge(emoji: &'static str) -> &'static str {
    BEAUTIFUL_LOGGER.badge(emoji)
}

/// Tags every subsequent log line with the invocation's request id.
pub fn set_request_id(request_id: Option<String>) {
    BEAUTIFUL_LOGGER.set_request_id(request_id);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Trace => "🔍",
            LogLevel::Debug => "🐛",
            LogLevel::Info => "💡",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Parses a `LOG_LEVEL` value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn to_log_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }

    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        self.to_log_level().to_level_filter()
    }

    pub fn from_log_level(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

/// Structured log entry; one JSON line per entry in the Lambda preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub module: String,
    pub file: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_ms: Option<u64>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: String, module: String, file: String, line: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level,
            message,
            module,
            file,
            line,
            request_id: None,
            uptime_ms: None,
        }
    }

    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_uptime(mut self, uptime: Duration) -> Self {
        self.uptime_ms = Some(uptime.as_millis() as u64);
        self
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_emojis: bool,
    pub show_file_location: bool,
    pub show_module: bool,
    pub include_timestamp: bool,
    pub timestamp_format: String,
    pub output_json: bool,
    pub track_uptime: bool,
    pub custom_prefix: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: true,
            show_emojis: true,
            show_file_location: true,
            show_module: true,
            include_timestamp: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            output_json: false,
            track_uptime: false,
            custom_prefix: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.custom_prefix = Some(prefix.into());
        self
    }

    /// JSON lines inside Lambda, prefixed colored console output elsewhere.
    /// `LOG_LEVEL` overrides the preset's level either way.
    pub fn for_runtime(handler_name: &str) -> Self {
        Self::for_runtime_with(handler_name, |key| std::env::var(key).ok())
    }

    pub fn for_runtime_with(handler_name: &str, var: impl Fn(&str) -> Option<String>) -> Self {
        let in_lambda = var("AWS_LAMBDA_FUNCTION_NAME").map_or(false, |name| !name.is_empty());
        let config = if in_lambda {
            Self::lambda()
        } else {
            Self::development().with_prefix(handler_name)
        };

        match var("LOG_LEVEL").as_deref().and_then(LogLevel::parse) {
            Some(level) => config.with_level(level),
            None => config,
        }
    }

    /// JSON lines on stdout, picked up by CloudWatch.
    pub fn lambda() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: false,
            show_emojis: false,
            output_json: true,
            track_uptime: true,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            show_colors: true,
            show_emojis: true,
            output_json: false,
            show_file_location: true,
            ..Default::default()
        }
    }
}

pub struct BeautifulLogger {
    config: Mutex<LoggerConfig>,
    request_id: Mutex<Option<String>>,
    start_time: Instant,
}

impl BeautifulLogger {
    pub fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
            request_id: Mutex::new(None),
            start_time: Instant::now(),
        }
    }

    pub fn update_config(&self, new_config: LoggerConfig) {
        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
    }

    pub fn badge(&self, emoji: &'static str) -> &'static str {
        match self.config.lock() {
            Ok(config) if config.show_emojis => emoji,
            _ => "",
        }
    }

    pub fn set_request_id(&self, request_id: Option<String>) {
        if let Ok(mut current) = self.request_id.lock() {
            *current = request_id;
        }
    }

    fn format_console_output(&self, entry: &LogEntry, config: &LoggerConfig) -> String {
        let mut output = String::new();

        if let Some(prefix) = &config.custom_prefix {
            if config.show_colors {
                output.push_str(&format!("[{}] ", prefix.bright_white().bold()));
            } else {
                output.push_str(&format!("[{}] ", prefix));
            }
        }

        if config.include_timestamp {
            let timestamp = entry.timestamp.format(&config.timestamp_format);
            if config.show_colors {
                output.push_str(&format!("{} ", timestamp.to_string().bright_black()));
            } else {
                output.push_str(&format!("{} ", timestamp));
            }
        }

        let level_str = if config.show_emojis {
            format!("{} {}", entry.level.emoji(), entry.level.as_str())
        } else {
            entry.level.as_str().to_string()
        };

        if config.show_colors {
            output.push_str(&format!(
                "[{}] ",
                level_str.color(entry.level.color()).bold()
            ));
        } else {
            output.push_str(&format!("[{}] ", level_str));
        }

        if config.show_module && !entry.module.is_empty() {
            if config.show_colors {
                output.push_str(&format!("{}::", entry.module.bright_blue()));
            } else {
                output.push_str(&format!("{}::", entry.module));
            }
        }

        if config.show_colors {
            output.push_str(&entry.message.white().bold().to_string());
        } else {
            output.push_str(&entry.message);
        }

        if let Some(request_id) = &entry.request_id {
            if config.show_colors {
                output.push_str(&format!(" [req:{}]", request_id.bright_yellow()));
            } else {
                output.push_str(&format!(" [req:{}]", request_id));
            }
        }

        if config.show_file_location {
            let location = format!("{}:{}", entry.file, entry.line);
            if config.show_colors {
                output.push_str(&format!(" ({})", location.bright_black()));
            } else {
                output.push_str(&format!(" ({})", location));
            }
        }

        output
    }

    fn create_log_entry(&self, record: &Record, config: &LoggerConfig) -> LogEntry {
        let mut entry = LogEntry::new(
            LogLevel::from_log_level(record.level()),
            record.args().to_string(),
            record.module_path().unwrap_or("unknown").to_string(),
            record.file().unwrap_or("unknown").to_string(),
            record.line().unwrap_or(0),
        );

        if let Ok(request_id) = self.request_id.lock() {
            if let Some(id) = request_id.as_ref() {
                entry = entry.with_request_id(id.clone());
            }
        }
        if config.track_uptime {
            entry = entry.with_uptime(self.start_time.elapsed());
        }
        entry
    }

    fn render(&self, record: &Record) -> Option<String> {
        let config = self.config.lock().ok()?;
        let entry = self.create_log_entry(record, &config);
        if config.output_json {
            Some(serde_json::to_string(&entry).unwrap_or_default())
        } else {
            Some(self.format_console_output(&entry, &config))
        }
    }
}

impl Default for BeautifulLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for BeautifulLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if let Ok(config) = self.config.lock() {
            metadata.level() <= config.min_level.to_log_level()
        } else {
            true
        }
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Some(line) = self.render(record) {
                println!("{}", line);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

/// Logs how long a scope took when dropped.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        log::debug!("{}Starting timer: {}", badge("⏱️  "), name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn stop(&self) {
        log::info!(
            "{}Timer '{}' completed in {}ms",
            badge("⏱️  "),
            self.name,
            self.elapsed().as_millis()
        );
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn timer(name: &str) -> Timer {
    Timer::new(name)
}

pub fn log_startup_info(handler_name: &str, version: &str, aws: &AwsConfig) {
    log::info!("{}Starting {} v{}", badge("🚀 "), handler_name, version);
    log::info!("   Region: {}", aws.region_or_default());
    log::info!(
        "   Credentials: {}",
        if aws.session_token.is_some() {
            "environment (temporary, with session token)"
        } else if aws.access_key.is_some() {
            "environment (long-term)"
        } else {
            "default provider chain"
        }
    );
}

pub fn log_image_config(config: &ImageHandlerConfig) {
    log::info!("{}Image handler configuration:", badge("⚙️  "));
    log::info!("   Model: {}", config.model_id);
    log::info!("   Style preset: {}", config.style_preset);
    log::info!("   Bucket: {}", config.bucket);
}

pub fn log_text_config(config: &TextHandlerConfig) {
    log::info!("{}Text handler configuration:", badge("⚙️  "));
    log::info!("   Model: {}", config.model_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> LogEntry {
        LogEntry::new(
            LogLevel::Info,
            "Invoking model: anthropic.claude-v2".to_string(),
            "rgenai_handlers::bedrock::text_client".to_string(),
            "src/bedrock/text_client.rs".to_string(),
            33,
        )
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Error.emoji(), "❌");
        assert_eq!(LogLevel::Debug.color(), Color::Blue);
        assert_eq!(LogLevel::Warn.to_log_level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" warning "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_logger_config() {
        let config = LoggerConfig::development();
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.show_colors);

        let lambda_config = LoggerConfig::lambda();
        assert!(!lambda_config.show_colors);
        assert!(lambda_config.output_json);
    }

    #[test]
    fn test_runtime_config_inside_lambda() {
        let config = LoggerConfig::for_runtime_with("imggen", |key| match key {
            "AWS_LAMBDA_FUNCTION_NAME" => Some("start-imggen".to_string()),
            _ => None,
        });
        assert!(config.output_json);
        assert!(!config.show_emojis);
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.custom_prefix.is_none());
    }

    #[test]
    fn test_runtime_config_outside_lambda() {
        let config = LoggerConfig::for_runtime_with("textgen", |key| match key {
            "LOG_LEVEL" => Some("warn".to_string()),
            _ => None,
        });
        assert!(!config.output_json);
        assert!(config.show_colors);
        assert_eq!(config.custom_prefix.as_deref(), Some("textgen"));
        assert_eq!(config.min_level, LogLevel::Warn);
    }

    #[test]
    fn test_badge_follows_emoji_setting() {
        let logger = BeautifulLogger::new();
        logger.update_config(LoggerConfig::lambda());
        assert_eq!(logger.badge("🚀 "), "");

        logger.update_config(LoggerConfig::development());
        assert_eq!(logger.badge("🚀 "), "🚀 ");
    }

    #[test]
    fn test_plain_console_format() {
        let logger = BeautifulLogger::new();
        let config = LoggerConfig::new()
            .with_colors(false)
            .with_prefix("textgen");
        let config = LoggerConfig {
            show_emojis: false,
            include_timestamp: false,
            ..config
        };
        let entry = sample_entry().with_request_id("req-1".to_string());

        let line = logger.format_console_output(&entry, &config);
        assert_eq!(
            line,
            "[textgen] [INFO] rgenai_handlers::bedrock::text_client::Invoking model: anthropic.claude-v2 [req:req-1] (src/bedrock/text_client.rs:33)"
        );
    }

    #[test]
    fn test_json_entry_skips_empty_fields() {
        let json = serde_json::to_value(sample_entry()).unwrap();
        assert_eq!(json["level"], "Info");
        assert!(json.get("request_id").is_none());
        assert!(json.get("uptime_ms").is_none());

        let json = serde_json::to_value(
            sample_entry()
                .with_request_id("req-7".to_string())
                .with_uptime(Duration::from_millis(1500)),
        )
        .unwrap();
        assert_eq!(json["request_id"], "req-7");
        assert_eq!(json["uptime_ms"], 1500);
    }

    #[test]
    fn test_logger_initialization() {
        let config = LoggerConfig::development();
        assert!(init_with_config(config).is_ok());
        set_request_id(Some("req-42".to_string()));
        log::info!("logger test line");
        set_request_id(None);
    }
}
