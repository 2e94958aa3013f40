//! Reduces monitoring time series into fixed-size windows of summary statistics.
//!
//! A monitoring backend reports one data point per alignment period; listing them
//! as table rows at a coarser resolution requires folding each run of points into a window
//! and reporting its maximum, minimum, sum, average and sample count.
//!
//! The granularity token selects the window size, the lookback horizon and the alignment
//! period requested upstream (see [`Granularity`]).
//!
//! Points are expected in the order the provider delivers them, which is most-recent-first.
//! Use [`Order::OldestFirst`] if the data source delivers ascending timestamps.
//!
//! ```
//! use metric_windows::{Builder, Granularity, RawSample, SampleValue};
//!
//! let samples = vec![
//!     RawSample::parse(SampleValue::Double(10.0), "2024-05-01T12:00:00Z")?,
//!     RawSample::parse(SampleValue::Int64(20), "2024-05-01T11:30:00Z")?,
//!     RawSample::parse(SampleValue::String("5".into()), "2024-05-01T10:58:20Z")?,
//! ];
//!
//! let windows = Builder::new()
//!     .granularity(Granularity::parse("hourly"))
//!     .aggregate_samples(&samples)?;
//!
//! assert_eq!(2, windows.len());
//! assert_eq!(15.0, windows[0].average);
//! assert_eq!(2.0, windows[0].sample_count);
//! assert_eq!(5.0, windows[1].average);
//!
//! # Ok::<(), metric_windows::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::result_unit_err)]

mod agg;
mod error;
mod granularity;
mod sample;
mod series_key;
mod time;

type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;

pub use agg::{
    aggregate,
    builder::Builder,
    group::{GroupedAggregation, MetricRow, SeriesMeta},
    stream::Aggregator,
    Order, WindowStatistic,
};
pub use error::{Error, Result};
pub use granularity::{Granularity, GranularityProfile};
pub use sample::{
    normalize, normalize_all, NormalizedPoint, RawSample, SampleValue, DROP_UNSUPPORTED_KINDS,
};
pub use series_key::SeriesKey;
pub use time::{parse_timestamp, timestamp};

/// Value used in time series
pub type Value = f64;

/// A timezone-aware instant, normalized to UTC
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A list of tags.
pub type TagSet<'a> = [(&'a str, &'a str)];

/// Macro to create a list of tags.
///
/// # Examples
///
/// ```
/// use metric_windows::{tagset, TagSet};
///
/// let tags: &TagSet = tagset!(
///   "disk" => "pd-1",
///   "zone" => "us-east1-b",
/// );
/// ```
#[macro_export]
macro_rules! tagset {
  ($($k:expr => $v:expr),* $(,)?) => {{
      &[$(($k.into(), $v.into()),)*]
  }}
}
