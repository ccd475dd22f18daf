// Time window selection from compact duration tokens ("30m", "6h", "7d")
use super::dashboard::TimeWindow;
use regex::Regex;
use std::sync::LazyLock;

static DURATION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([mhd])$").expect("Invalid regex for duration tokens"));

const DEFAULT_FROM: &str = "now-6h";
const DEFAULT_INTERVAL: &str = "1m";
const SHORT_RANGE_INTERVAL: &str = "30s";
/// Ranges of at least this many minutes get a minute-granularity interval.
const MINUTES_PER_INTERVAL_STEP: u64 = 360;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeRange {
    pub time: TimeWindow,
    pub interval: String,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            time: TimeWindow {
                from: DEFAULT_FROM.to_string(),
                to: "now".to_string(),
            },
            interval: DEFAULT_INTERVAL.to_string(),
        }
    }
}

impl TimeRange {
    /// Resolve a selector token. Missing or malformed tokens fall back to the
    /// last six hours sampled every minute.
    pub fn resolve(token: Option<&str>) -> Self {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::default();
        };

        let Some(minutes) = Self::token_minutes(token) else {
            tracing::debug!("Ignoring malformed time selector '{}'", token);
            return Self::default();
        };

        let interval = if minutes >= MINUTES_PER_INTERVAL_STEP {
            format!("{}m", minutes / MINUTES_PER_INTERVAL_STEP)
        } else {
            SHORT_RANGE_INTERVAL.to_string()
        };

        Self {
            time: TimeWindow {
                from: format!("now-{}", token),
                to: "now".to_string(),
            },
            interval,
        }
    }

    fn token_minutes(token: &str) -> Option<u64> {
        let caps = DURATION_TOKEN.captures(token)?;
        let amount: u64 = caps[1].parse().ok()?;
        match &caps[2] {
            "m" => Some(amount),
            "h" => amount.checked_mul(60),
            "d" => amount.checked_mul(60 * 24),
            _ => None,
        }
    }
}
