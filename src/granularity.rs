use crate::Timestamp;
use chrono::TimeDelta;

/// Reporting resolution of a metric query.
///
/// ```
/// use metric_windows::Granularity;
///
/// assert_eq!(Granularity::Daily, Granularity::parse("daily"));
/// assert_eq!(Granularity::Hourly, Granularity::parse("HOURLY"));
///
/// // Anything else falls back to the fine granularity
/// assert_eq!(Granularity::Fine, Granularity::parse("weekly"));
/// assert_eq!(Granularity::Fine, Granularity::parse(""));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// One window per day, looking back one year
    Daily,

    /// One window per hour, looking back 60 days
    Hourly,

    /// One window per 5 minutes, looking back 5 days
    #[default]
    Fine,
}

impl Granularity {
    /// Maps a granularity token (case-insensitive) to a granularity.
    ///
    /// Unrecognized tokens are not an error, they select [`Granularity::Fine`].
    /// Callers that want strict validation must check the token themselves.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();

        if token.eq_ignore_ascii_case("DAILY") {
            Self::Daily
        } else if token.eq_ignore_ascii_case("HOURLY") {
            Self::Hourly
        } else {
            log::trace!("granularity token {token:?} falls back to {}", Self::Fine);
            Self::Fine
        }
    }

    /// Returns the window policy of this granularity.
    #[must_use]
    pub fn profile(self) -> GranularityProfile {
        match self {
            Self::Daily => GranularityProfile {
                lookback: TimeDelta::days(365),
                window: TimeDelta::hours(24),
                alignment_period: "86400s",
            },
            Self::Hourly => GranularityProfile {
                lookback: TimeDelta::days(60),
                window: TimeDelta::hours(1),
                alignment_period: "3600s",
            },
            Self::Fine => GranularityProfile {
                lookback: TimeDelta::days(5),
                window: TimeDelta::minutes(5),
                alignment_period: "300s",
            },
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "DAILY"),
            Self::Hourly => write!(f, "HOURLY"),
            Self::Fine => write!(f, "5_MIN"),
        }
    }
}

/// Lookback horizon, window size and upstream alignment period of a granularity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GranularityProfile {
    /// How far back to fetch data
    pub lookback: TimeDelta,

    /// Window ("bucket") size
    pub window: TimeDelta,

    /// Alignment period passed to the upstream query (e.g. `3600s`)
    pub alignment_period: &'static str,
}

impl GranularityProfile {
    /// Shorthand for `Granularity::parse(token).profile()`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        Granularity::parse(token).profile()
    }

    /// Start of the query interval ending at `now`.
    #[must_use]
    pub fn start_time(&self, now: Timestamp) -> Timestamp {
        now - self.lookback
    }
}
