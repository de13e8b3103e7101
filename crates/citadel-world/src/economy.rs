//! Yearly tax income against building maintenance.

use crate::map::CityMap;

/// One year's income statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    /// Taxes collected from all buildings.
    pub taxes: i64,
    /// Maintenance owed for all buildings.
    pub maintenance: i64,
    /// `taxes - maintenance`.
    pub balance: i64,
}

/// Sum of all building taxes.
pub fn taxes(map: &CityMap) -> i64 {
    map.buildings().map(|(_, b)| i64::from(b.taxes)).sum()
}

/// Sum of all building maintenance costs.
pub fn maintenance(map: &CityMap) -> i64 {
    map.buildings()
        .map(|(_, b)| i64::from(b.maintenance_costs))
        .sum()
}

/// Taxes, maintenance and their difference.
pub fn balance(map: &CityMap) -> Balance {
    let taxes = taxes(map);
    let maintenance = maintenance(map);
    Balance {
        taxes,
        maintenance,
        balance: taxes.saturating_sub(maintenance),
    }
}
