use crate::error::AnalyticsError;
use crate::report::TopProduct;
use core_types::Seller;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Running totals for one seller during an aggregation run.
///
/// Values are kept unrounded; rounding happens once when the report row is built.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStat {
    pub id: String,
    pub name: String,
    pub revenue: Decimal,
    pub profit: Decimal,
    /// Number of purchase records, not line items.
    pub sales_count: u64,
    /// Cumulative quantity sold per SKU.
    pub products_sold: HashMap<String, u64>,
}

impl SellerStat {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            revenue: Decimal::ZERO,
            profit: Decimal::ZERO,
            sales_count: 0,
            products_sold: HashMap::new(),
        }
    }

    pub fn from_seller(seller: &Seller) -> Self {
        Self::new(seller.id.clone(), seller.full_name())
    }

    /// Adds one line item's contribution. Totals are left untouched when any
    /// of them would overflow.
    pub(crate) fn record_item(
        &mut self,
        sku: &str,
        quantity: u32,
        revenue: Decimal,
        profit: Decimal,
    ) -> Result<(), AnalyticsError> {
        let out_of_range = |what: &str| {
            AnalyticsError::InvalidInput(format!("{what} of seller `{}` is out of range", self.id))
        };

        let revenue = self.revenue.checked_add(revenue).ok_or_else(|| out_of_range("revenue"))?;
        let profit = self.profit.checked_add(profit).ok_or_else(|| out_of_range("profit"))?;
        let sold = self.products_sold.get(sku).copied().unwrap_or(0);
        let sold = sold
            .checked_add(u64::from(quantity))
            .ok_or_else(|| out_of_range("quantity"))?;

        self.revenue = revenue;
        self.profit = profit;
        self.products_sold.insert(sku.to_string(), sold);
        Ok(())
    }

    /// The `limit` best-selling SKUs, by quantity descending.
    /// Equal quantities are ordered by SKU so the result is reproducible.
    pub fn top_products(&self, limit: usize) -> Vec<TopProduct> {
        let mut sold: Vec<(&String, &u64)> = self.products_sold.iter().collect();
        sold.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        sold.into_iter()
            .take(limit)
            .map(|(sku, quantity)| TopProduct {
                sku: sku.clone(),
                quantity: *quantity,
            })
            .collect()
    }
}
