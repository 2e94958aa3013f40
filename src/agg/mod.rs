pub mod builder;
mod fold;
pub mod group;
pub mod stream;

use crate::{sample::NormalizedPoint, Error, Timestamp, Value};
use chrono::TimeDelta;
use stream::Aggregator;

/// Summary statistics of one window of a time series
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WindowStatistic {
    /// Largest value in the window
    pub maximum: Value,

    /// Smallest value in the window
    pub minimum: Value,

    /// Sum of all values in the window
    pub sum: Value,

    /// `sum / sample_count`
    pub average: Value,

    /// Number of data points folded into the window
    pub sample_count: Value,

    /// Start of the window the statistic was computed for
    pub timestamp: Timestamp,
}

/// Delivery order of the data points of a series.
///
/// The window start is anchored at the first point and advances in this direction,
/// so feeding points in the other order puts every point into the first window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Order {
    /// Descending timestamps, as delivered by the monitoring backend
    #[default]
    MostRecentFirst,

    /// Ascending timestamps
    OldestFirst,
}

impl Order {
    /// Time between the window start and a point, positive if the point lies in
    /// the direction the scan advances.
    fn elapsed(self, window_start: Timestamp, ts: Timestamp) -> TimeDelta {
        match self {
            Self::MostRecentFirst => window_start - ts,
            Self::OldestFirst => ts - window_start,
        }
    }

    /// Start of the window following the one starting at `window_start`.
    fn advance(self, window_start: Timestamp, window: TimeDelta) -> Timestamp {
        match self {
            Self::MostRecentFirst => window_start - window,
            Self::OldestFirst => window_start + window,
        }
    }
}

/// Reduces the data points of one series into windows of `window` width.
///
/// The first window starts at the first point, every following window starts exactly one
/// window width further in scan direction, regardless of gaps in the data.
/// Points are not sorted, they must be delivered in `order`.
///
/// ```
/// use chrono::{DateTime, TimeDelta};
/// use metric_windows::{aggregate, NormalizedPoint, Order};
///
/// let ts = |secs| DateTime::from_timestamp(secs, 0).unwrap();
///
/// let points = [
///     NormalizedPoint::new(10.0, ts(0)),
///     NormalizedPoint::new(20.0, ts(-1_800)),
///     NormalizedPoint::new(5.0, ts(-3_700)),
/// ];
///
/// let windows = aggregate(&points, TimeDelta::hours(1), Order::MostRecentFirst)?;
///
/// assert_eq!(2, windows.len());
/// assert_eq!((20.0, 10.0, 15.0), (windows[0].maximum, windows[0].minimum, windows[0].average));
/// assert_eq!(ts(-3_600), windows[1].timestamp);
///
/// # Ok::<(), metric_windows::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `points` is empty or `window` is not positive.
pub fn aggregate(
    points: &[NormalizedPoint],
    window: TimeDelta,
    order: Order,
) -> crate::Result<Vec<WindowStatistic>> {
    if points.is_empty() || window <= TimeDelta::zero() {
        return Err(Error::InvalidInput);
    }

    let windows = Aggregator::new(points.iter().copied().map(Ok), window, order)
        .collect::<crate::Result<Vec<_>>>()?;

    log::debug!(
        "aggregated {} points into {} windows of {window}",
        points.len(),
        windows.len(),
    );

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use test_log::test;

    fn ts(secs: i64) -> Timestamp {
        DateTime::from_timestamp(secs, 0).unwrap_or_default()
    }

    fn points(points: &[(i64, Value)]) -> Vec<NormalizedPoint> {
        points
            .iter()
            .map(|&(secs, value)| NormalizedPoint::new(value, ts(secs)))
            .collect()
    }

    fn assert_conserved(windows: &[WindowStatistic]) {
        for w in windows {
            assert!((w.sum - w.sample_count * w.average).abs() < 1e-9);
            assert!(w.minimum <= w.average && w.average <= w.maximum);
        }
    }

    #[test]
    fn hourly_three_points() -> crate::Result<()> {
        let windows = aggregate(
            &points(&[(0, 10.0), (-1_800, 20.0), (-3_700, 5.0)]),
            TimeDelta::hours(1),
            Order::MostRecentFirst,
        )?;

        assert_eq!(
            vec![
                WindowStatistic {
                    maximum: 20.0,
                    minimum: 10.0,
                    sum: 30.0,
                    average: 15.0,
                    sample_count: 2.0,
                    timestamp: ts(0),
                },
                WindowStatistic {
                    maximum: 5.0,
                    minimum: 5.0,
                    sum: 5.0,
                    average: 5.0,
                    sample_count: 1.0,
                    timestamp: ts(-3_600),
                },
            ],
            windows,
        );

        Ok(())
    }

    #[test]
    fn empty_is_invalid() {
        assert!(matches!(
            aggregate(&[], TimeDelta::minutes(5), Order::MostRecentFirst),
            Err(Error::InvalidInput)
        ));
    }

    #[test]
    fn non_positive_window_is_invalid() {
        let points = points(&[(0, 1.0)]);

        for window in [TimeDelta::zero(), TimeDelta::seconds(-300)] {
            assert!(matches!(
                aggregate(&points, window, Order::MostRecentFirst),
                Err(Error::InvalidInput)
            ));
        }
    }

    #[test]
    fn single_point() -> crate::Result<()> {
        let windows = aggregate(
            &points(&[(100, 4.2)]),
            TimeDelta::minutes(5),
            Order::MostRecentFirst,
        )?;

        assert_eq!(1, windows.len());

        let w = windows.first().copied().ok_or(Error::InvalidInput)?;
        assert_eq!(1.0, w.sample_count);
        assert_eq!(4.2, w.average);
        assert_eq!(4.2, w.minimum);
        assert_eq!(4.2, w.maximum);
        assert_eq!(ts(100), w.timestamp);

        Ok(())
    }

    #[test]
    fn boundary_closes_window() -> crate::Result<()> {
        let windows = aggregate(
            &points(&[(0, 1.0), (-299, 2.0), (-300, 3.0)]),
            TimeDelta::minutes(5),
            Order::MostRecentFirst,
        )?;

        assert_eq!(2, windows.len());
        assert_eq!(2.0, windows.first().map_or(0.0, |w| w.sample_count));
        assert_eq!(
            Some((3.0, ts(-300))),
            windows.get(1).map(|w| (w.sum, w.timestamp)),
        );

        Ok(())
    }

    #[test]
    fn boundary_closes_window_ascending() -> crate::Result<()> {
        let windows = aggregate(
            &points(&[(0, 1.0), (299, 2.0), (300, 3.0), (599, 4.0), (600, 5.0)]),
            TimeDelta::minutes(5),
            Order::OldestFirst,
        )?;

        assert_eq!(
            vec![(3.0, 2.0, ts(0)), (7.0, 2.0, ts(300)), (5.0, 1.0, ts(600))],
            windows
                .iter()
                .map(|w| (w.sum, w.sample_count, w.timestamp))
                .collect::<Vec<_>>(),
        );

        Ok(())
    }

    #[test]
    fn non_finite_point_fails_series() {
        for value in [f64::NAN, f64::INFINITY] {
            let result = aggregate(
                &points(&[(0, value), (-10, 3.0)]),
                TimeDelta::minutes(5),
                Order::MostRecentFirst,
            );

            assert!(matches!(
                result,
                Err(Error::MalformedSample { source: None, .. })
            ));
        }
    }

    #[test]
    fn window_count_dense_series() -> crate::Result<()> {
        // 5 hours of minutely points, most recent first
        let series = (0..300_i32)
            .map(|i| (-60 * i64::from(i), f64::from(i)))
            .collect::<Vec<_>>();

        let windows = aggregate(
            &points(&series),
            TimeDelta::hours(1),
            Order::MostRecentFirst,
        )?;

        assert_eq!(5, windows.len());
        assert!(windows.iter().all(|w| w.sample_count == 60.0));
        assert_eq!(300.0, windows.iter().map(|w| w.sample_count).sum::<f64>());
        assert_conserved(&windows);

        // Window starts lie on a grid anchored at the first point
        for (idx, w) in windows.iter().enumerate() {
            let idx = i64::try_from(idx).unwrap_or_default();
            assert_eq!(ts(-3_600 * idx), w.timestamp);
        }

        Ok(())
    }

    #[test]
    fn sparse_series_keeps_grid() -> crate::Result<()> {
        // Gap of almost 3 windows between the first and second point
        let windows = aggregate(
            &points(&[(0, 1.0), (-10_000, 2.0), (-10_100, 3.0)]),
            TimeDelta::hours(1),
            Order::MostRecentFirst,
        )?;

        // The window start only advances one window per closed window
        assert_eq!(
            vec![(1.0, ts(0)), (2.0, ts(-3_600)), (3.0, ts(-7_200))],
            windows
                .iter()
                .map(|w| (w.sum, w.timestamp))
                .collect::<Vec<_>>(),
        );

        Ok(())
    }

    #[test]
    fn out_of_order_value_is_folded() -> crate::Result<()> {
        let windows = aggregate(
            &points(&[(0, 1.0), (60, 2.0), (-60, 3.0)]),
            TimeDelta::minutes(5),
            Order::MostRecentFirst,
        )?;

        assert_eq!(1, windows.len());
        assert_eq!(3.0, windows.first().map_or(0.0, |w| w.sample_count));

        Ok(())
    }

    #[test]
    fn ascending_input() -> crate::Result<()> {
        let ascending = points(&[(-3_700, 5.0), (-1_800, 20.0), (0, 10.0)]);

        // Treated as most-recent-first, everything lands in the first window
        let windows = aggregate(&ascending, TimeDelta::hours(1), Order::MostRecentFirst)?;
        assert_eq!(1, windows.len());

        let windows = aggregate(&ascending, TimeDelta::hours(1), Order::OldestFirst)?;
        assert_eq!(
            vec![(25.0, 2.0, ts(-3_700)), (10.0, 1.0, ts(-100))],
            windows
                .iter()
                .map(|w| (w.sum, w.sample_count, w.timestamp))
                .collect::<Vec<_>>(),
        );
        assert_conserved(&windows);

        Ok(())
    }

    #[test]
    fn order_is_mirrored() -> crate::Result<()> {
        let descending = (0..50_i32)
            .map(|i| (-97 * i64::from(i), f64::from(i % 7)))
            .collect::<Vec<_>>();
        let ascending = descending
            .iter()
            .map(|&(secs, value)| (-secs, value))
            .collect::<Vec<_>>();

        let a = aggregate(
            &points(&descending),
            TimeDelta::minutes(5),
            Order::MostRecentFirst,
        )?;
        let b = aggregate(
            &points(&ascending),
            TimeDelta::minutes(5),
            Order::OldestFirst,
        )?;

        assert_eq!(a.len(), b.len());
        for (a, b) in a.iter().zip(&b) {
            assert_eq!(a.sum, b.sum);
            assert_eq!(a.sample_count, b.sample_count);
            assert_eq!(a.timestamp.timestamp(), -b.timestamp.timestamp());
        }

        Ok(())
    }
}
