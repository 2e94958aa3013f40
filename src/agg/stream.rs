use super::{fold::Window, Order, WindowStatistic};
use crate::{sample::NormalizedPoint, Error};
use chrono::TimeDelta;

/// A streaming aggregator
///
/// Takes in the data points of one series, and emits window statistics in the
/// order the windows are closed.
///
/// An empty source yields a single [`Error::InvalidInput`], a NaN or infinite
/// value an [`Error::MalformedSample`].
/// The stream ends after the first error.
pub struct Aggregator<I>
where
    I: Iterator<Item = crate::Result<NormalizedPoint>>,
{
    reader: I,
    window_size: TimeDelta,
    order: Order,
    window: Option<Window>,
    is_done: bool,
}

impl<I> Aggregator<I>
where
    I: Iterator<Item = crate::Result<NormalizedPoint>>,
{
    pub(crate) fn new(reader: I, window_size: TimeDelta, order: Order) -> Self {
        Self {
            reader,
            window_size,
            order,
            window: None,
            is_done: false,
        }
    }
}

impl<I> Iterator for Aggregator<I>
where
    I: Iterator<Item = crate::Result<NormalizedPoint>>,
{
    type Item = crate::Result<WindowStatistic>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done {
            return None;
        }

        for data_point in self.reader.by_ref() {
            let data_point = match data_point {
                Ok(v) => v,
                Err(e) => {
                    self.is_done = true;
                    return Some(Err(e));
                }
            };

            if !data_point.value.is_finite() {
                self.is_done = true;
                return Some(Err(Error::MalformedSample {
                    value: data_point.value.to_string(),
                    source: None,
                }));
            }

            let Some(window) = self.window.as_mut() else {
                // NOTE: First point anchors the window grid
                self.window = Some(Window::new(data_point.timestamp, data_point.value));
                continue;
            };

            let elapsed = self.order.elapsed(window.start, data_point.timestamp);

            if elapsed < TimeDelta::zero() {
                log::trace!(
                    "data point at {} lies before window start {} ({:?})",
                    data_point.timestamp,
                    window.start,
                    self.order,
                );
            }

            if elapsed >= self.window_size {
                // NOTE: Return window, and open next window on the grid with this point
                let start = self.order.advance(window.start, self.window_size);
                let closed = std::mem::replace(window, Window::new(start, data_point.value));
                let stat = closed.finish();

                log::trace!(
                    "closing window at {} with {} points",
                    stat.timestamp,
                    stat.sample_count
                );

                return Some(Ok(stat));
            }

            window.fold(data_point.value);
        }

        self.is_done = true;

        match self.window.take() {
            // NOTE: Return last window
            Some(window) => Some(Ok(window.finish())),
            None => Some(Err(Error::InvalidInput)),
        }
    }
}
