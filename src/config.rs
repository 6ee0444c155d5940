use std::{env, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MARKER_HOURS: u32 = 168;
/// Two weeks; every hour past 144 already shows the last stage.
const MAX_MARKER_HOURS: u32 = 336;
const DEFAULT_WATCH_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Markers cover hours `0..marker_hours`.
    pub marker_hours: u32,
    pub watch_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            marker_hours: DEFAULT_MARKER_HOURS,
            watch_interval: Duration::from_millis(DEFAULT_WATCH_INTERVAL_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let watch_ms = parse_var(&lookup, "FAST_WATCH_INTERVAL_MS")
            .filter(|ms: &u64| *ms > 0)
            .unwrap_or(DEFAULT_WATCH_INTERVAL_MS);

        Self {
            port: parse_var(&lookup, "PORT").unwrap_or(defaults.port),
            marker_hours: parse_var(&lookup, "FAST_MARKER_HOURS")
                .map(|hours: u32| hours.min(MAX_MARKER_HOURS))
                .unwrap_or(defaults.marker_hours),
            watch_interval: Duration::from_millis(watch_ms),
        }
    }

    pub fn marker_range(&self) -> Vec<u32> {
        (0..self.marker_hours).collect()
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.trim().parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.marker_hours, 168);
        assert_eq!(config.watch_interval, Duration::from_secs(1));
        assert_eq!(config.marker_range().len(), 168);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("FAST_MARKER_HOURS", "72"),
            ("FAST_WATCH_INTERVAL_MS", "250"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.marker_hours, 72);
        assert_eq!(config.watch_interval, Duration::from_millis(250));
        assert_eq!(config.marker_range().last(), Some(&71));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("FAST_MARKER_HOURS", "-3"),
            ("FAST_WATCH_INTERVAL_MS", "0"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.marker_hours, 168);
        assert_eq!(config.watch_interval, Duration::from_secs(1));
    }

    #[test]
    fn marker_hours_are_capped() {
        let config = config_from(&[("FAST_MARKER_HOURS", "4000000000")]);
        assert_eq!(config.marker_hours, MAX_MARKER_HOURS);
        assert_eq!(config.marker_range().len(), 336);

        let config = config_from(&[("FAST_MARKER_HOURS", "336")]);
        assert_eq!(config.marker_hours, 336);
    }
}
