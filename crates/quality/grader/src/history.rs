use crate::error::GradeError;
use crate::stats::Moments;
use quality_types::Timestamp;

/// Every score graded so far, across all earlier periods.
///
/// Scores of period `t` are committed only after `t` has been graded, so
/// while grading `t` the window holds periods strictly before `t`.
#[derive(Clone, Debug, Default)]
pub struct HistoricalWindow {
    scores: Vec<f64>,
    through: Option<Timestamp>,
}

impl HistoricalWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append period `timestamp`, which must follow every committed period.
    pub fn commit(
        &mut self,
        timestamp: Timestamp,
        scores: impl IntoIterator<Item = f64>,
    ) -> Result<(), GradeError> {
        if let Some(previous) = self.through {
            if timestamp <= previous {
                return Err(GradeError::OutOfOrder {
                    previous,
                    next: timestamp,
                });
            }
        }
        self.scores.extend(scores);
        self.through = Some(timestamp);
        Ok(())
    }

    /// `None` until some period with at least one score has been committed.
    pub fn moments(&self) -> Option<Moments> {
        Moments::of(&self.scores)
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn through(&self) -> Option<Timestamp> {
        self.through
    }
}
