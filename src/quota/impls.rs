// Standard library
use std::str::FromStr;

// Current module imports
use super::errors::ConfigError;
use super::types::RateLimitSpec;

impl FromStr for RateLimitSpec {
    type Err = ConfigError;

    /// Parses a rate-limit string like `"10/s"`, `"600/m"` or `"1000/h"`
    /// into `(calls, period_seconds)`. The unit is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ConfigError::MissingSpec);
        }

        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            return Err(ConfigError::InvalidFormat(s.to_string()));
        }

        let calls: u32 = parts[0]
            .parse()
            .map_err(|_| ConfigError::InvalidCalls(parts[0].to_string()))?;
        if calls == 0 {
            return Err(ConfigError::InvalidCalls(parts[0].to_string()));
        }

        let period_seconds: u64 = match parts[1].to_lowercase().as_str() {
            "s" => 1,
            "m" => 60,
            "h" => 3600,
            _ => return Err(ConfigError::InvalidPeriod(parts[1].to_string())),
        };

        Ok(RateLimitSpec {
            calls,
            period_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_per_second() {
        let spec: RateLimitSpec = "10/s".parse().unwrap();
        assert_eq!(spec.calls, 10);
        assert_eq!(spec.period_seconds, 1);
    }

    #[test]
    fn parses_per_minute() {
        let spec: RateLimitSpec = "600/m".parse().unwrap();
        assert_eq!(spec.calls, 600);
        assert_eq!(spec.period_seconds, 60);
    }

    #[test]
    fn parses_per_hour() {
        let spec: RateLimitSpec = "1000/h".parse().unwrap();
        assert_eq!(spec.calls, 1000);
        assert_eq!(spec.period_seconds, 3600);
    }

    #[test]
    fn unit_is_case_insensitive() {
        let spec: RateLimitSpec = "5/S".parse().unwrap();
        assert_eq!(spec.period_seconds, 1);
        let spec: RateLimitSpec = "5/M".parse().unwrap();
        assert_eq!(spec.period_seconds, 60);
    }

    #[test]
    fn rejects_empty_string() {
        assert_eq!(
            "".parse::<RateLimitSpec>().unwrap_err(),
            ConfigError::MissingSpec
        );
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(
            "10".parse::<RateLimitSpec>().unwrap_err(),
            ConfigError::InvalidFormat(_)
        ));
    }

    #[test]
    fn rejects_extra_separator() {
        assert!(matches!(
            "10/s/s".parse::<RateLimitSpec>().unwrap_err(),
            ConfigError::InvalidFormat(_)
        ));
    }

    #[test]
    fn rejects_non_integer_calls() {
        assert!(matches!(
            "abc/s".parse::<RateLimitSpec>().unwrap_err(),
            ConfigError::InvalidCalls(_)
        ));
    }

    #[test]
    fn rejects_negative_calls() {
        assert!(matches!(
            "-3/s".parse::<RateLimitSpec>().unwrap_err(),
            ConfigError::InvalidCalls(_)
        ));
    }

    #[test]
    fn rejects_zero_calls() {
        assert!(matches!(
            "0/s".parse::<RateLimitSpec>().unwrap_err(),
            ConfigError::InvalidCalls(_)
        ));
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!(matches!(
            "10/x".parse::<RateLimitSpec>().unwrap_err(),
            ConfigError::InvalidPeriod(_)
        ));
    }

    #[test]
    fn parsing_is_repeatable() {
        let first: RateLimitSpec = "30/m".parse().unwrap();
        let second: RateLimitSpec = "30/m".parse().unwrap();
        assert_eq!(first, second);
    }
}
