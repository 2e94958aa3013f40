use crate::{time::parse_timestamp, Error, Timestamp, Value};

/// Samples whose value has no numeric representation (booleans, distributions)
/// are skipped instead of failing the series.
///
/// This is the default of [`crate::Builder::drop_unsupported_kinds`].
pub const DROP_UNSUPPORTED_KINDS: bool = true;

/// A provider-reported measurement value
#[derive(Clone, Debug, PartialEq)]
pub enum SampleValue {
    /// Floating point value
    Double(f64),

    /// Integer value
    Int64(i64),

    /// Numeric value transported as a base-10 string
    String(String),

    /// Boolean value (unsupported)
    Bool(bool),

    /// Distribution value (unsupported)
    Distribution {
        /// Number of values in the distribution
        count: i64,

        /// Mean of the values in the distribution
        mean: f64,
    },
}

impl SampleValue {
    /// Name of the value kind, as reported by the monitoring API.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Double(_) => "DOUBLE",
            Self::Int64(_) => "INT64",
            Self::String(_) => "STRING",
            Self::Bool(_) => "BOOL",
            Self::Distribution { .. } => "DISTRIBUTION",
        }
    }
}

/// One measurement as delivered by the monitoring backend
#[derive(Clone, Debug, PartialEq)]
pub struct RawSample {
    /// Measured value
    pub value: SampleValue,

    /// Start of the interval the value was measured in
    pub start_time: Timestamp,
}

impl RawSample {
    /// Creates a sample.
    #[must_use]
    pub fn new(value: SampleValue, start_time: Timestamp) -> Self {
        Self { value, start_time }
    }

    /// Creates a sample from a fixed-offset RFC 3339 interval start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp is malformed.
    pub fn parse(value: SampleValue, start_time: &str) -> crate::Result<Self> {
        Ok(Self::new(value, parse_timestamp(start_time)?))
    }
}

/// A data point with a plain numeric value
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NormalizedPoint {
    /// Value
    pub value: Value,

    /// Timestamp
    pub timestamp: Timestamp,
}

impl NormalizedPoint {
    /// Creates a data point.
    #[must_use]
    pub fn new(value: Value, timestamp: Timestamp) -> Self {
        Self { value, timestamp }
    }
}

/// Converts a raw sample into a data point.
///
/// Returns `Ok(None)` if the sample kind is unsupported and `drop_unsupported` is set.
///
/// # Errors
///
/// Returns an error if a numeric string does not parse, if the value is NaN or
/// infinite, or if the sample kind is unsupported and `drop_unsupported` is not set.
pub fn normalize(
    sample: &RawSample,
    drop_unsupported: bool,
) -> crate::Result<Option<NormalizedPoint>> {
    #[allow(clippy::cast_precision_loss)]
    let value = match &sample.value {
        SampleValue::Double(v) => *v,
        SampleValue::Int64(v) => *v as Value,
        SampleValue::String(s) => s.parse::<Value>().map_err(|e| Error::MalformedSample {
            value: s.clone(),
            source: Some(e),
        })?,
        unsupported => {
            if drop_unsupported {
                log::trace!(
                    "dropping {} sample at {}",
                    unsupported.kind(),
                    sample.start_time
                );
                return Ok(None);
            }
            return Err(Error::UnsupportedSampleKind(unsupported.kind()));
        }
    };

    // NOTE: NaN would poison the sum while max/min skip it
    if !value.is_finite() {
        let value = match &sample.value {
            SampleValue::String(s) => s.clone(),
            _ => value.to_string(),
        };
        return Err(Error::MalformedSample {
            value,
            source: None,
        });
    }

    Ok(Some(NormalizedPoint::new(value, sample.start_time)))
}

/// Converts a batch of raw samples, preserving their order.
///
/// # Errors
///
/// Aborts on the first sample [`normalize`] fails on.
pub fn normalize_all(
    samples: &[RawSample],
    drop_unsupported: bool,
) -> crate::Result<Vec<NormalizedPoint>> {
    let mut points = Vec::with_capacity(samples.len());

    for sample in samples {
        if let Some(point) = normalize(sample, drop_unsupported)? {
            points.push(point);
        }
    }

    Ok(points)
}
