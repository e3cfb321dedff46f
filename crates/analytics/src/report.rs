use crate::stat::SellerStat;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A best-selling SKU of a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub sku: String,
    pub quantity: u64,
}

/// One line of the seller performance report.
///
/// This struct is the final output of the `SalesAggregator`. Monetary values
/// carry exactly two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub seller_id: String,
    pub name: String,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub sales_count: u64,
    pub top_products: Vec<TopProduct>,
    pub bonus: Decimal,
}

impl ReportRow {
    /// Finalizes a seller's totals. This is the only place where the
    /// accumulated revenue and profit get rounded.
    pub(crate) fn from_stat(stat: &SellerStat, bonus: Decimal, top_products_limit: usize) -> Self {
        Self {
            seller_id: stat.id.clone(),
            name: stat.name.clone(),
            revenue: round_money(stat.revenue),
            profit: round_money(stat.profit),
            sales_count: stat.sales_count,
            top_products: stat.top_products(top_products_limit),
            bonus: round_money(bonus),
        }
    }
}

/// Rounds to cents, half away from zero, and pins the scale to 2
/// so that `270` is carried as `270.00`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
