use super::{builder::Builder, WindowStatistic};
use crate::{sample::RawSample, series_key::SeriesKey};
use std::sync::Arc;

/// Identity of a monitored series, attached to each of its rows
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesMeta {
    /// Value of the resource dimension (e.g. disk or instance ID)
    pub resource: String,

    /// Metric type (e.g. `compute.googleapis.com/instance/disk/read_ops_count`)
    pub metric: String,

    /// Unit of the values
    pub unit: String,

    /// Location (region or zone) of the resource
    pub location: String,

    /// Project the resource belongs to
    pub project: String,
}

impl SeriesMeta {
    /// Printable key of the series.
    #[must_use]
    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(
            &self.metric,
            &[
                ("location", self.location.as_str()),
                ("project", self.project.as_str()),
                ("resource", self.resource.as_str()),
                ("unit", self.unit.as_str()),
            ],
        )
    }
}

/// One window statistic of a series, as listed to the consumer
#[derive(Clone, Debug, PartialEq)]
pub struct MetricRow {
    /// Series the statistic was computed for
    pub meta: Arc<SeriesMeta>,

    /// Window statistic
    pub stat: WindowStatistic,
}

/// A dictionary of series that are aggregated independently of each other.
///
/// Series are told apart by their full [`SeriesMeta`]. Pages of the same series
/// can be pushed one after another, they are concatenated in push order.
///
/// Call `.collect()` for the per-series results, or `.rows()` for the rows
/// of all series that could be aggregated.
pub struct GroupedAggregation {
    builder: Builder,
    series: crate::HashMap<Arc<SeriesMeta>, Vec<RawSample>>,
}

impl GroupedAggregation {
    /// Creates an empty group aggregating with the given configuration.
    #[must_use]
    pub fn new(builder: Builder) -> Self {
        Self {
            builder,
            series: crate::HashMap::default(),
        }
    }

    /// Adds a page of samples to a series.
    pub fn push(&mut self, meta: SeriesMeta, samples: impl IntoIterator<Item = RawSample>) {
        if let Some(series) = self.series.get_mut(&meta) {
            series.extend(samples);
        } else {
            log::trace!("adding series {}", meta.key());

            self.series.insert(Arc::new(meta), samples.into_iter().collect());
        }
    }

    /// Number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if no series was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Consumes all series, returning a dictionary mapping each series to its
    /// window statistics, or the error its aggregation failed with.
    ///
    /// A failed series does not affect the others.
    #[must_use]
    pub fn collect(
        self,
    ) -> crate::HashMap<Arc<SeriesMeta>, crate::Result<Vec<WindowStatistic>>> {
        let mut map =
            crate::HashMap::with_capacity_and_hasher(self.series.len(), rustc_hash::FxBuildHasher);

        for (meta, samples) in self.series {
            let result = self.builder.aggregate_samples(&samples);
            map.insert(meta, result);
        }

        map
    }

    /// Consumes all series, returning one row per window, ordered by series.
    ///
    /// Series that fail to aggregate are omitted (and logged).
    #[must_use]
    pub fn rows(self) -> Vec<MetricRow> {
        let builder = self.builder;

        let mut series = self.series.into_iter().collect::<Vec<_>>();
        series.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut rows = vec![];

        for (meta, samples) in series {
            match builder.aggregate_samples(&samples) {
                Ok(windows) => {
                    rows.extend(windows.into_iter().map(|stat| MetricRow {
                        meta: meta.clone(),
                        stat,
                    }));
                }
                Err(e) => {
                    log::warn!("omitting series {}: {e}", meta.key());
                }
            }
        }

        rows
    }
}
