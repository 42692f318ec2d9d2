//! Runtime configuration read from the environment.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

/// Engine runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Randomizer seed for the piece bag.
    pub seed: u32,
    /// Capacity of the command queue between input and the engine loop.
    pub max_pending_commands: usize,
    /// When set, every notification is appended to this file as a JSON line.
    pub event_log_path: Option<String>,
    /// Terminal bell feedback.
    pub sound: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            max_pending_commands: 32,
            event_log_path: None,
            sound: true,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables.
    ///
    /// Unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let seed = env::var("TETRIS_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let max_pending_commands = env::var("TETRIS_MAX_PENDING")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.max_pending_commands)
            .max(1);

        let event_log_path = env::var("TETRIS_EVENT_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let sound = env::var("TETRIS_SOUND")
            .map(|v| parse_flag(&v).unwrap_or(defaults.sound))
            .unwrap_or(defaults.sound);

        Self {
            seed,
            max_pending_commands,
            event_log_path,
            sound,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Seed derived from the wall clock, for unseeded runs.
pub fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(1);
    // Fold the high bits in; the low bits alone repeat across fast restarts.
    ((nanos >> 32) as u32) ^ (nanos as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_pending_commands, 32);
        assert!(config.sound);
        assert!(config.event_log_path.is_none());
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let config = EngineConfig::from_env();
        assert!(config.max_pending_commands >= 1);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(" FALSE "), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}
