use soilcd_macros::Series;

#[derive(Debug, Clone, Copy, Series)]
#[series(name = "FractionColumns")]
pub struct FractionRow {
    pub dissolved: f64,
    pub adsorbed: f64,
}

fn main() {
    let row = FractionRow { dissolved: 0.4, adsorbed: 0.6 };
    let mut columns = FractionColumns::with_capacity(5);
    columns.push(&row);
    assert_eq!(columns.len(), 1);
    assert_eq!(columns.adsorbed, vec![0.6]);
    assert_eq!(FractionRow::field_names(), &["dissolved", "adsorbed"]);
}
