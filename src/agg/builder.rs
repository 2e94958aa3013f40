use super::{stream::Aggregator, Order, WindowStatistic};
use crate::{
    granularity::{Granularity, GranularityProfile},
    sample::{normalize_all, NormalizedPoint, RawSample, DROP_UNSUPPORTED_KINDS},
    Error,
};
use chrono::TimeDelta;

/// Configures how the series of a query are aggregated.
///
/// ```
/// use metric_windows::{Builder, Granularity, Order};
///
/// let builder = Builder::new()
///     .granularity(Granularity::Daily)
///     .order(Order::MostRecentFirst);
///
/// assert_eq!(86_400, builder.window_size().num_seconds());
/// assert_eq!("86400s", builder.profile().alignment_period);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Builder {
    granularity: Granularity,
    window: Option<TimeDelta>,
    order: Order,
    drop_unsupported: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a builder using the fine granularity, most-recent-first order,
    /// dropping unsupported sample kinds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            granularity: Granularity::default(),
            window: None,
            order: Order::default(),
            drop_unsupported: DROP_UNSUPPORTED_KINDS,
        }
    }

    /// Sets the granularity, which determines the window size.
    ///
    /// Default = [`Granularity::Fine`]
    #[must_use]
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Overrides the window size of the granularity.
    #[must_use]
    pub fn window(mut self, window: TimeDelta) -> Self {
        self.window = Some(window);
        self
    }

    /// Sets the order the data points are delivered in.
    ///
    /// Default = [`Order::MostRecentFirst`]
    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// If `false`, a sample without a numeric value fails the series
    /// instead of being skipped.
    ///
    /// Default = [`DROP_UNSUPPORTED_KINDS`]
    #[must_use]
    pub fn drop_unsupported_kinds(mut self, enabled: bool) -> Self {
        self.drop_unsupported = enabled;
        self
    }

    /// Policy of the configured granularity.
    #[must_use]
    pub fn profile(&self) -> GranularityProfile {
        self.granularity.profile()
    }

    /// Width of a window.
    #[must_use]
    pub fn window_size(&self) -> TimeDelta {
        self.window.unwrap_or_else(|| self.profile().window)
    }

    /// Returns a streaming aggregator over `points`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the window size is not positive.
    pub fn stream<I>(&self, points: I) -> crate::Result<Aggregator<I::IntoIter>>
    where
        I: IntoIterator<Item = crate::Result<NormalizedPoint>>,
    {
        let window = self.window_size();

        if window <= TimeDelta::zero() {
            return Err(Error::InvalidInput);
        }

        Ok(Aggregator::new(points.into_iter(), window, self.order))
    }

    /// Aggregates the data points of one series.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if there are no points.
    pub fn aggregate(&self, points: &[NormalizedPoint]) -> crate::Result<Vec<WindowStatistic>> {
        super::aggregate(points, self.window_size(), self.order)
    }

    /// Normalizes and aggregates the raw samples of one series.
    ///
    /// # Errors
    ///
    /// Returns an error if a sample is malformed, or no sample has a numeric value.
    /// No statistics are returned for a failed series.
    pub fn aggregate_samples(&self, samples: &[RawSample]) -> crate::Result<Vec<WindowStatistic>> {
        let points = normalize_all(samples, self.drop_unsupported)?;

        log::trace!("normalized {} of {} samples", points.len(), samples.len());

        self.aggregate(&points)
    }

    /// Normalizes and aggregates the pages of one series, as fetched from the backend.
    ///
    /// Pages are concatenated in the order given, points are not re-sorted.
    ///
    /// # Errors
    ///
    /// Same as [`Builder::aggregate_samples`].
    pub fn aggregate_pages<P, S>(&self, pages: P) -> crate::Result<Vec<WindowStatistic>>
    where
        P: IntoIterator<Item = S>,
        S: AsRef<[RawSample]>,
    {
        let mut points = vec![];

        for page in pages {
            points.extend(normalize_all(page.as_ref(), self.drop_unsupported)?);
        }

        self.aggregate(&points)
    }
}
