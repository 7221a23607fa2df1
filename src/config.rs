use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_PHRASES: [&str; 4] = [
    "Frontend Developer",
    "UI/UX Enthusiast",
    "Animation Lover",
    "Performance Focused",
];
pub const DEFAULT_TYPE_DELAY_MS: u32 = 70;
pub const DEFAULT_DELETE_DELAY_MS: u32 = 40;
pub const DEFAULT_HOLD_DELAY_MS: u32 = 1_200;
pub const DEFAULT_START_DELAY_MS: u32 = 600;
pub const DEFAULT_SUBMIT_DELAY_MS: u32 = 1_200;
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

const STEP_DELAY_MS_BOUNDS: (u32, u32) = (10, 2_000);
const PAUSE_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("site config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub type_delay_ms: u32,
    pub delete_delay_ms: u32,
    pub hold_delay_ms: u32,
    pub start_delay_ms: u32,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_delay_ms: DEFAULT_TYPE_DELAY_MS,
            delete_delay_ms: DEFAULT_DELETE_DELAY_MS,
            hold_delay_ms: DEFAULT_HOLD_DELAY_MS,
            start_delay_ms: DEFAULT_START_DELAY_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub phrases: Vec<String>,
    pub typewriter: TypewriterTiming,
    pub submit_delay_ms: u32,
    pub log_level: log::Level,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            phrases: default_phrases(),
            typewriter: TypewriterTiming::default(),
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// Overrides as they appear in the inline `#site-config` block. Every field
/// is kept loose so one bad value only resets that field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSiteConfig {
    phrases: Option<Value>,
    type_delay_ms: Option<Value>,
    delete_delay_ms: Option<Value>,
    hold_delay_ms: Option<Value>,
    start_delay_ms: Option<Value>,
    submit_delay_ms: Option<Value>,
    log_level: Option<Value>,
}

impl SiteConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawSiteConfig = serde_json::from_str(source)?;

        Ok(Self {
            phrases: parse_phrases(raw.phrases.as_ref()),
            typewriter: TypewriterTiming {
                type_delay_ms: parse_u32_with_bounds(
                    raw.type_delay_ms.as_ref(),
                    DEFAULT_TYPE_DELAY_MS,
                    STEP_DELAY_MS_BOUNDS,
                ),
                delete_delay_ms: parse_u32_with_bounds(
                    raw.delete_delay_ms.as_ref(),
                    DEFAULT_DELETE_DELAY_MS,
                    STEP_DELAY_MS_BOUNDS,
                ),
                hold_delay_ms: parse_u32_with_bounds(
                    raw.hold_delay_ms.as_ref(),
                    DEFAULT_HOLD_DELAY_MS,
                    PAUSE_DELAY_MS_BOUNDS,
                ),
                start_delay_ms: parse_u32_with_bounds(
                    raw.start_delay_ms.as_ref(),
                    DEFAULT_START_DELAY_MS,
                    PAUSE_DELAY_MS_BOUNDS,
                ),
            },
            submit_delay_ms: parse_u32_with_bounds(
                raw.submit_delay_ms.as_ref(),
                DEFAULT_SUBMIT_DELAY_MS,
                PAUSE_DELAY_MS_BOUNDS,
            ),
            log_level: parse_log_level(raw.log_level.as_ref(), DEFAULT_LOG_LEVEL),
        })
    }
}

fn default_phrases() -> Vec<String> {
    DEFAULT_PHRASES.iter().map(|phrase| phrase.to_string()).collect()
}

fn parse_phrases(value: Option<&Value>) -> Vec<String> {
    let phrases: Vec<String> = value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|phrase| !phrase.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();

    if phrases.is_empty() {
        default_phrases()
    } else {
        phrases
    }
}

fn parse_u32_with_bounds(value: Option<&Value>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .and_then(Value::as_u64)
        .and_then(|value| u32::try_from(value).ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(value: Option<&Value>, default: log::Level) -> log::Level {
    match value
        .and_then(Value::as_str)
        .map(|level| level.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("debug") => log::Level::Debug,
        Some("info") => log::Level::Info,
        Some("warn") => log::Level::Warn,
        Some("error") => log::Level::Error,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_yields_defaults() {
        let config = SiteConfig::from_json("  ").expect("blank config is valid");
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.phrases.len(), DEFAULT_PHRASES.len());
    }

    #[test]
    fn overrides_within_bounds_are_applied() {
        let config = SiteConfig::from_json(
            r#"{"phrases":["Hi","Yo"],"typeDelayMs":90,"holdDelayMs":0,"logLevel":"DEBUG"}"#,
        )
        .expect("valid config");

        assert_eq!(config.phrases, vec!["Hi".to_string(), "Yo".to_string()]);
        assert_eq!(config.typewriter.type_delay_ms, 90);
        assert_eq!(config.typewriter.hold_delay_ms, 0);
        assert_eq!(config.typewriter.delete_delay_ms, DEFAULT_DELETE_DELAY_MS);
        assert_eq!(config.log_level, log::Level::Debug);
    }

    #[test]
    fn out_of_bounds_fields_fall_back_individually() {
        let config = SiteConfig::from_json(
            r#"{"typeDelayMs":1,"deleteDelayMs":-5,"startDelayMs":"soon","submitDelayMs":250}"#,
        )
        .expect("valid config");

        assert_eq!(config.typewriter.type_delay_ms, DEFAULT_TYPE_DELAY_MS);
        assert_eq!(config.typewriter.delete_delay_ms, DEFAULT_DELETE_DELAY_MS);
        assert_eq!(config.typewriter.start_delay_ms, DEFAULT_START_DELAY_MS);
        assert_eq!(config.submit_delay_ms, 250);
    }

    #[test]
    fn blank_phrases_are_dropped_and_empty_list_uses_defaults() {
        let config = SiteConfig::from_json(r#"{"phrases":["  ", "", 3]}"#).expect("valid config");
        assert_eq!(config.phrases, default_phrases());

        let config = SiteConfig::from_json(r#"{"phrases":[" Rustacean ", ""]}"#).expect("valid config");
        assert_eq!(config.phrases, vec!["Rustacean".to_string()]);
    }

    #[test]
    fn unknown_log_level_keeps_default() {
        let config = SiteConfig::from_json(r#"{"logLevel":"verbose"}"#).expect("valid config");
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SiteConfig::from_json("{not json").expect_err("broken block");
        assert!(err.to_string().starts_with("site config is not valid JSON"));
        assert!(SiteConfig::from_json(r#""just text""#).is_err());
    }
}
