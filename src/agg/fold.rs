use super::WindowStatistic;
use crate::{Timestamp, Value};

/// Defines how one statistic folds the values of a window.
///
/// - `init` seeds the statistic with the first value (default: Identity)
///
/// - `transform` defines what to do with each further value (default: Add)
pub trait Aggregation {
    fn init(value: Value) -> Value {
        value
    }

    fn transform(accu: Value, x: Value) -> Value {
        accu + x
    }
}

pub struct Max;

impl Aggregation for Max {
    fn transform(accu: Value, x: Value) -> Value {
        accu.max(x)
    }
}

pub struct Min;

impl Aggregation for Min {
    fn transform(accu: Value, x: Value) -> Value {
        accu.min(x)
    }
}

pub struct Sum;

impl Aggregation for Sum {}

pub struct Count;

impl Aggregation for Count {
    fn init(_: Value) -> Value {
        1.0
    }

    fn transform(accu: Value, _: Value) -> Value {
        accu + 1.0
    }
}

/// Running accumulators of the window currently being filled
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Window {
    pub start: Timestamp,
    max: Value,
    min: Value,
    sum: Value,
    count: Value,
}

impl Window {
    /// Opens a window at `start`, already holding one value.
    pub fn new(start: Timestamp, value: Value) -> Self {
        Self {
            start,
            max: Max::init(value),
            min: Min::init(value),
            sum: Sum::init(value),
            count: Count::init(value),
        }
    }

    pub fn fold(&mut self, value: Value) {
        self.max = Max::transform(self.max, value);
        self.min = Min::transform(self.min, value);
        self.sum = Sum::transform(self.sum, value);
        self.count = Count::transform(self.count, value);
    }

    pub fn finish(&self) -> WindowStatistic {
        WindowStatistic {
            maximum: self.max,
            minimum: self.min,
            sum: self.sum,
            // NOTE: A window is never empty, it is opened with its first value
            average: self.sum / self.count,
            sample_count: self.count,
            timestamp: self.start,
        }
    }
}
