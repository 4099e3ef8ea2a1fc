use serde::{Deserialize, Serialize};

/// The four quality indicators tracked per station and day.
///
/// Declaration order is significant: it fixes tensor layout, weight vector
/// layout, and tie-breaking in grade explanations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Cost of inspecting reworked parts.
    InspectionCost,
    /// Share of output with a defect (`1 - pass_rate`).
    DefectRate,
    /// Cost of rework, excluding inspection.
    ReworkCost,
    /// Cost of scrapped parts.
    ScrapCost,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::InspectionCost,
        Indicator::DefectRate,
        Indicator::ReworkCost,
        Indicator::ScrapCost,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in [`Indicator::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::InspectionCost => 0,
            Self::DefectRate => 1,
            Self::ReworkCost => 2,
            Self::ScrapCost => 3,
        }
    }

    /// Column name used at the ingestion and export boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InspectionCost => "inspection_cost",
            Self::DefectRate => "defect_rate",
            Self::ReworkCost => "rework_cost",
            Self::ScrapCost => "scrap_cost",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `f64` per indicator.
///
/// Used for raw metric rows, normalized rows, weight vectors and weighted
/// contributions alike; serializes as an object keyed by indicator name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValues {
    pub inspection_cost: f64,
    pub defect_rate: f64,
    pub rework_cost: f64,
    pub scrap_cost: f64,
}

impl IndicatorValues {
    pub fn new(inspection_cost: f64, defect_rate: f64, rework_cost: f64, scrap_cost: f64) -> Self {
        Self {
            inspection_cost,
            defect_rate,
            rework_cost,
            scrap_cost,
        }
    }

    /// Same value for every indicator.
    pub fn splat(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn from_fn(mut f: impl FnMut(Indicator) -> f64) -> Self {
        Self::new(
            f(Indicator::InspectionCost),
            f(Indicator::DefectRate),
            f(Indicator::ReworkCost),
            f(Indicator::ScrapCost),
        )
    }

    pub fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::InspectionCost => self.inspection_cost,
            Indicator::DefectRate => self.defect_rate,
            Indicator::ReworkCost => self.rework_cost,
            Indicator::ScrapCost => self.scrap_cost,
        }
    }

    pub fn set(&mut self, indicator: Indicator, value: f64) {
        match indicator {
            Indicator::InspectionCost => self.inspection_cost = value,
            Indicator::DefectRate => self.defect_rate = value,
            Indicator::ReworkCost => self.rework_cost = value,
            Indicator::ScrapCost => self.scrap_cost = value,
        }
    }

    /// `(indicator, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, f64)> + '_ {
        Indicator::ALL.into_iter().map(move |i| (i, self.get(i)))
    }

    pub fn map(&self, mut f: impl FnMut(Indicator, f64) -> f64) -> Self {
        Self::from_fn(|i| f(i, self.get(i)))
    }

    /// Element-wise product.
    pub fn weighted_by(&self, weights: &IndicatorValues) -> Self {
        self.map(|i, v| v * weights.get(i))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }

    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, v)| v.is_finite())
    }

    /// Rescale so the values sum to 1. Returns `None` when the sum is not
    /// strictly positive and finite.
    pub fn normalized(&self) -> Option<Self> {
        let total = self.sum();
        if total > 0.0 && total.is_finite() {
            Some(self.map(|_, v| v / total))
        } else {
            None
        }
    }
}
