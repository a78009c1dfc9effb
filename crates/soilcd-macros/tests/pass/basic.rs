use soilcd_macros::Series;

#[derive(Debug, Clone, Copy, Series)]
pub struct WeekRow {
    pub surface_conc: f64,
    pub deep_conc: f64,
    pub leached: f64,
}

fn main() {
    let row = WeekRow { surface_conc: 60.0, deep_conc: 3.0, leached: 0.5 };
    let mut series = WeekRowSeries::with_capacity(10);
    assert!(series.is_empty());
    series.push(&row);
    series.push(&row);
    assert_eq!(series.len(), 2);
    assert_eq!(series.column("deep_conc"), Some(&[3.0, 3.0][..]));
    assert_eq!(series.column("missing"), None);
    assert_eq!(WeekRow::field_names(), &["surface_conc", "deep_conc", "leached"]);
}
