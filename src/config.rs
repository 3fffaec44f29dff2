use crate::error::Error;
use leptos::logging::log;
use std::time::Duration;

/// Knobs of the upload and chat simulations.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub progress_interval: Duration,
    /// Upper bound of the random progress step, in percent.
    pub max_increment: f64,
    pub reply_delay_min: Duration,
    pub reply_delay_max: Duration,
    /// Larger files are rejected. Off unless `maxSize` is given.
    pub max_file_size: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_millis(200),
            max_increment: 30.0,
            reply_delay_min: Duration::from_millis(1000),
            reply_delay_max: Duration::from_millis(3000),
            max_file_size: None,
        }
    }
}

fn invalid(key: &str, value: &str) -> Error {
    Error::Config {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Browser timers take an `i32` of milliseconds.
fn millis(key: &str, value: &str) -> Result<Duration, Error> {
    value
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms <= i32::MAX as u64)
        .map(Duration::from_millis)
        .ok_or_else(|| invalid(key, value))
}

impl SimulationConfig {
    /// Overrides defaults from a `location.search` string such as `?tick=50&maxSize=0`.
    pub fn from_query(search: &str) -> Result<Self, Error> {
        let url = url::Url::parse(&format!("http://localhost/{search}"))?;
        let mut config = Self::default();
        for (key, value) in url.query_pairs() {
            match &key[..] {
                "tick" => {
                    config.progress_interval = millis(&key, &value)?;
                    if config.progress_interval.is_zero() {
                        return Err(invalid(&key, &value));
                    }
                }
                "increment" => {
                    config.max_increment = value
                        .parse::<f64>()
                        .ok()
                        .filter(|increment| increment.is_finite() && *increment > 0.0)
                        .ok_or_else(|| invalid(&key, &value))?;
                }
                "replyMin" => config.reply_delay_min = millis(&key, &value)?,
                "replyMax" => config.reply_delay_max = millis(&key, &value)?,
                "maxSize" => {
                    let bytes = value.parse::<u64>().map_err(|_| invalid(&key, &value))?;
                    config.max_file_size = (bytes > 0).then_some(bytes);
                }
                string => log!("Unexpected param {string}: {value}"),
            }
        }
        if config.reply_delay_min > config.reply_delay_max {
            return Err(invalid(
                "replyMin",
                &config.reply_delay_min.as_millis().to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_keeps_defaults() {
        assert_eq!(
            SimulationConfig::from_query("").unwrap(),
            SimulationConfig::default()
        );
        let config = SimulationConfig::from_query("?").unwrap();
        assert_eq!(config.progress_interval, Duration::from_millis(200));
        assert_eq!(config.max_increment, 30.0);
        assert_eq!(config.max_file_size, None);
    }

    #[test]
    fn overrides() {
        let config =
            SimulationConfig::from_query("?tick=50&increment=10&replyMin=0&replyMax=10&maxSize=2048")
                .unwrap();
        assert_eq!(config.progress_interval, Duration::from_millis(50));
        assert_eq!(config.max_increment, 10.0);
        assert_eq!(config.reply_delay_min, Duration::ZERO);
        assert_eq!(config.reply_delay_max, Duration::from_millis(10));
        assert_eq!(config.max_file_size, Some(2048));
    }

    #[test]
    fn zero_size_limit_disables_check() {
        let config = SimulationConfig::from_query("?maxSize=0").unwrap();
        assert_eq!(config.max_file_size, None);
    }

    #[test]
    fn longest_browser_delay_is_accepted() {
        let config = SimulationConfig::from_query("?replyMax=2147483647").unwrap();
        assert_eq!(config.reply_delay_max, Duration::from_millis(2_147_483_647));
    }

    #[test]
    fn unknown_params_are_ignored() {
        let config = SimulationConfig::from_query("?code=abc&tick=100").unwrap();
        assert_eq!(config.progress_interval, Duration::from_millis(100));
    }

    #[test]
    fn rejects_invalid_values() {
        for search in [
            "?tick=fast",
            "?tick=0",
            "?increment=-5",
            "?increment=NaN",
            "?maxSize=-1",
            "?replyMin=4000&replyMax=1000",
            "?tick=3000000000",
            "?replyMax=2147483648",
        ] {
            let err = SimulationConfig::from_query(search).unwrap_err();
            assert!(matches!(err, Error::Config { .. }), "{search}: {err}");
        }
    }
}
