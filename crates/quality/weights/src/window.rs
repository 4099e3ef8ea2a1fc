use crate::error::WeightError;
use quality_types::{IndicatorValues, Timestamp};

/// Append-only accumulation of every raw row observed so far.
///
/// Each [`commit`](GrowingWindow::commit) adds one timestamp's rows; after
/// committing `t` the window holds exactly the rows with timestamp `<= t`.
/// Rows are never removed or rewritten.
#[derive(Clone, Debug, Default)]
pub struct GrowingWindow {
    rows: Vec<IndicatorValues>,
    through: Option<Timestamp>,
}

impl GrowingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the rows of `timestamp`, which must be later than every
    /// timestamp already committed.
    pub fn commit(
        &mut self,
        timestamp: Timestamp,
        rows: impl IntoIterator<Item = IndicatorValues>,
    ) -> Result<(), WeightError> {
        if let Some(previous) = self.through {
            if timestamp <= previous {
                return Err(WeightError::OutOfOrder {
                    previous,
                    next: timestamp,
                });
            }
        }
        self.rows.extend(rows);
        self.through = Some(timestamp);
        Ok(())
    }

    pub fn rows(&self) -> &[IndicatorValues] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Latest committed timestamp.
    pub fn through(&self) -> Option<Timestamp> {
        self.through
    }
}
