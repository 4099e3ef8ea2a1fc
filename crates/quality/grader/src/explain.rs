use quality_types::{Grade, Indicator, IndicatorValues};

/// Human-readable reason for a grade, built from the weighted contributions.
///
/// Good stations get an empty string. Medium names the single largest
/// contribution, Poor the two largest. Ties keep indicator order.
pub fn explain(grade: Grade, contributions: &IndicatorValues) -> String {
    let top = match grade {
        Grade::Good => return String::new(),
        Grade::Medium => 1,
        Grade::Poor => 2,
    };
    let mut ranked: Vec<(Indicator, f64)> = contributions.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(top)
        .map(|(indicator, value)| format!("{indicator}={value:.4}"))
        .collect::<Vec<_>>()
        .join(", ")
}
