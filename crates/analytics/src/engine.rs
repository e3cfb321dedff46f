use crate::error::AnalyticsError;
use crate::report::ReportRow;
use crate::scoring::ScoringOptions;
use crate::stat::SellerStat;
use configuration::ReportSettings;
use core_types::{Product, SalesData};
use std::collections::HashMap;
use tracing::{debug, warn};

/// How many SKUs are listed per seller unless configured otherwise.
pub const DEFAULT_TOP_PRODUCTS_LIMIT: usize = 10;

/// A stateless calculator that turns raw sales records into a ranked
/// seller performance report.
#[derive(Debug, Clone)]
pub struct SalesAggregator {
    top_products_limit: usize,
}

impl Default for SalesAggregator {
    fn default() -> Self {
        Self {
            top_products_limit: DEFAULT_TOP_PRODUCTS_LIMIT,
        }
    }
}

impl SalesAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &ReportSettings) -> Self {
        Self::default().with_top_products_limit(settings.top_products_limit)
    }

    pub fn with_top_products_limit(mut self, limit: usize) -> Self {
        self.top_products_limit = limit;
        self
    }

    /// The main entry point for building the report.
    ///
    /// # Arguments
    ///
    /// * `data` - The sellers, the product catalog and the purchase records.
    /// * `options` - The revenue, profit and bonus functions to apply.
    ///
    /// # Returns
    ///
    /// One `ReportRow` per seller, ordered by profit descending (ties by
    /// seller id ascending), or an `AnalyticsError` if a collection is missing,
    /// a mandatory scoring function is not set or an amount overflows `Decimal`.
    ///
    /// Purchase records of unknown sellers and line items with unknown SKUs
    /// are skipped with a warning; they never fail the run.
    pub fn run(
        &self,
        data: &SalesData,
        options: &ScoringOptions,
    ) -> Result<Vec<ReportRow>, AnalyticsError> {
        let sellers = require(&data.sellers, "sellers")?;
        let products = require(&data.products, "products")?;
        let records = require(&data.purchase_records, "purchase_records")?;
        let scoring = options.resolve()?;

        // Later entries overwrite earlier ones on duplicate keys.
        let product_index: HashMap<&str, &Product> = products
            .iter()
            .map(|product| (product.sku.as_str(), product))
            .collect();
        let mut seller_stats: HashMap<&str, SellerStat> = sellers
            .iter()
            .map(|seller| (seller.id.as_str(), SellerStat::from_seller(seller)))
            .collect();

        let mut skipped_records = 0usize;
        let mut skipped_items = 0usize;

        for record in records {
            let Some(stat) = seller_stats.get_mut(record.seller_id.as_str()) else {
                warn!(seller_id = %record.seller_id, "skipping purchase record of unknown seller");
                skipped_records += 1;
                continue;
            };

            stat.sales_count += 1;

            for item in &record.items {
                let Some(&product) = product_index.get(item.sku.as_str()) else {
                    warn!(
                        seller_id = %record.seller_id,
                        sku = %item.sku,
                        "skipping line item with unknown sku"
                    );
                    skipped_items += 1;
                    continue;
                };

                let revenue = (scoring.revenue)(item, product)
                    .ok_or_else(|| out_of_range("revenue", &record.seller_id, &item.sku))?;
                let profit = (scoring.profit)(item, product)
                    .ok_or_else(|| out_of_range("profit", &record.seller_id, &item.sku))?;
                stat.record_item(&item.sku, item.quantity, revenue, profit)?;
            }
        }

        let mut ranked: Vec<SellerStat> = seller_stats.into_values().collect();
        ranked.sort_by(|a, b| b.profit.cmp(&a.profit).then_with(|| a.id.cmp(&b.id)));

        let total = ranked.len();
        let rows: Vec<ReportRow> = ranked
            .iter()
            .enumerate()
            .map(|(index, stat)| {
                let bonus = (scoring.bonus)(index, total, stat).ok_or_else(|| {
                    AnalyticsError::InvalidInput(format!(
                        "bonus of seller `{}` is out of range",
                        stat.id
                    ))
                })?;
                Ok(ReportRow::from_stat(stat, bonus, self.top_products_limit))
            })
            .collect::<Result<_, AnalyticsError>>()?;

        debug!(
            sellers = rows.len(),
            records = records.len(),
            skipped_records,
            skipped_items,
            "sales report built"
        );

        Ok(rows)
    }
}

fn out_of_range(what: &str, seller_id: &str, sku: &str) -> AnalyticsError {
    AnalyticsError::InvalidInput(format!(
        "{what} of sku `{sku}` sold by `{seller_id}` is out of range"
    ))
}

/// Rejects a document whose collection `name` is absent.
fn require<'a, T>(collection: &'a Option<Vec<T>>, name: &str) -> Result<&'a [T], AnalyticsError> {
    collection
        .as_deref()
        .ok_or_else(|| AnalyticsError::InvalidInput(format!("`{name}` collection is missing")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{bonus_by_profit, simple_revenue};
    use core_types::{LineItem, PurchaseRecord, Seller};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn seller(id: &str) -> Seller {
        Seller {
            id: id.to_string(),
            first_name: "First".to_string(),
            last_name: id.to_uppercase(),
        }
    }

    fn product(sku: &str, purchase_price: Decimal) -> Product {
        Product {
            sku: sku.to_string(),
            purchase_price,
        }
    }

    fn item(sku: &str, quantity: u32, discount: Decimal, sale_price: Decimal) -> LineItem {
        LineItem {
            sku: sku.to_string(),
            quantity,
            discount,
            sale_price,
        }
    }

    fn record(seller_id: &str, items: Vec<LineItem>) -> PurchaseRecord {
        PurchaseRecord {
            seller_id: seller_id.to_string(),
            items,
        }
    }

    fn run(data: &SalesData) -> Vec<ReportRow> {
        SalesAggregator::new().run(data, &ScoringOptions::default()).unwrap()
    }

    /// One seller per profit, each with a single sale yielding exactly that profit
    /// (purchase price 0, no discount, quantity 1).
    fn sellers_with_profits(profits: &[Decimal]) -> SalesData {
        let sellers = (0..profits.len()).map(|i| seller(&format!("s{i}"))).collect();
        let records = profits
            .iter()
            .enumerate()
            .map(|(i, p)| record(&format!("s{i}"), vec![item("P", 1, Decimal::ZERO, *p)]))
            .collect();
        SalesData::new(sellers, vec![product("P", Decimal::ZERO)], records)
    }

    #[test]
    fn single_item_revenue_and_profit() {
        let data = SalesData::new(
            vec![seller("s1")],
            vec![product("SKU_1", dec!(60))],
            vec![record("s1", vec![item("SKU_1", 3, dec!(10), dec!(100))])],
        );

        let rows = run(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].seller_id, "s1");
        assert_eq!(rows[0].name, "First S1");
        assert_eq!(rows[0].revenue, dec!(270.00));
        assert_eq!(rows[0].profit, dec!(90.00));
        assert_eq!(rows[0].sales_count, 1);
        assert_eq!(rows[0].bonus, dec!(13.50));
    }

    #[test]
    fn bonuses_follow_profit_rank() {
        let data = sellers_with_profits(&[dec!(300), dec!(100), dec!(500), dec!(200), dec!(400)]);
        let rows = run(&data);

        let profits: Vec<Decimal> = rows.iter().map(|r| r.profit).collect();
        let bonuses: Vec<Decimal> = rows.iter().map(|r| r.bonus).collect();
        assert_eq!(profits, vec![dec!(500), dec!(400), dec!(300), dec!(200), dec!(100)]);
        assert_eq!(bonuses, vec![dec!(75), dec!(40), dec!(30), dec!(10), dec!(0)]);
    }

    #[test]
    fn single_seller_gets_top_bonus() {
        let rows = run(&sellers_with_profits(&[dec!(1000)]));
        assert_eq!(rows[0].bonus, dec!(150));
    }

    #[test]
    fn equal_profits_rank_by_seller_id() {
        let data = SalesData::new(
            vec![seller("b"), seller("c"), seller("a")],
            vec![],
            vec![],
        );
        let ids: Vec<String> = run(&data).into_iter().map(|r| r.seller_id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_sku_is_skipped() {
        let data = SalesData::new(
            vec![seller("s1")],
            vec![product("KNOWN", dec!(1))],
            vec![record(
                "s1",
                vec![
                    item("KNOWN", 2, Decimal::ZERO, dec!(5)),
                    item("GHOST", 100, Decimal::ZERO, dec!(1000)),
                ],
            )],
        );

        let rows = run(&data);
        assert_eq!(rows[0].revenue, dec!(10));
        assert_eq!(rows[0].profit, dec!(8));
        assert_eq!(rows[0].sales_count, 1);
        assert_eq!(rows[0].top_products.len(), 1);
        assert_eq!(rows[0].top_products[0].sku, "KNOWN");
    }

    #[test]
    fn unknown_seller_record_is_skipped_entirely() {
        let data = SalesData::new(
            vec![seller("s1")],
            vec![product("P", dec!(1))],
            vec![
                record("s1", vec![item("P", 1, Decimal::ZERO, dec!(10))]),
                record("nobody", vec![item("P", 50, Decimal::ZERO, dec!(10))]),
            ],
        );

        let rows = run(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sales_count, 1);
        assert_eq!(rows[0].revenue, dec!(10));
        assert_eq!(rows[0].top_products[0].quantity, 1);
    }

    #[test]
    fn sales_count_is_per_record_not_per_item() {
        let data = SalesData::new(
            vec![seller("s1")],
            vec![product("A", dec!(1)), product("B", dec!(1))],
            vec![
                record("s1", vec![item("A", 1, Decimal::ZERO, dec!(2)), item("B", 1, Decimal::ZERO, dec!(2))]),
                record("s1", vec![]),
            ],
        );
        assert_eq!(run(&data)[0].sales_count, 2);
    }

    #[test]
    fn duplicate_sku_last_entry_wins() {
        let data = SalesData::new(
            vec![seller("s1")],
            vec![product("P", dec!(1)), product("P", dec!(4))],
            vec![record("s1", vec![item("P", 1, Decimal::ZERO, dec!(10))])],
        );
        assert_eq!(run(&data)[0].profit, dec!(6));
    }

    #[test]
    fn profit_is_rounded_once_at_the_end() {
        // Three items of 0.005 profit each: per-item rounding would give 0.03,
        // a single final rounding gives 0.02 (0.015 -> 0.02).
        let data = SalesData::new(
            vec![seller("s1")],
            vec![product("P", Decimal::ZERO)],
            vec![record(
                "s1",
                vec![
                    item("P", 1, Decimal::ZERO, dec!(0.005)),
                    item("P", 1, Decimal::ZERO, dec!(0.005)),
                    item("P", 1, Decimal::ZERO, dec!(0.005)),
                ],
            )],
        );
        assert_eq!(run(&data)[0].profit, dec!(0.02));
    }

    #[test]
    fn top_products_limit_is_configurable() {
        let products: Vec<Product> = (0..5).map(|i| product(&format!("P{i}"), Decimal::ZERO)).collect();
        let items = (0..5).map(|i| item(&format!("P{i}"), i + 1, Decimal::ZERO, dec!(1))).collect();
        let data = SalesData::new(vec![seller("s1")], products, vec![record("s1", items)]);

        let rows = SalesAggregator::new()
            .with_top_products_limit(2)
            .run(&data, &ScoringOptions::default())
            .unwrap();
        let skus: Vec<&str> = rows[0].top_products.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["P4", "P3"]);
    }

    #[test]
    fn empty_collections_yield_empty_report() {
        assert!(run(&SalesData::new(vec![], vec![], vec![])).is_empty());
    }

    #[test]
    fn missing_collection_is_invalid_input() {
        let data = SalesData {
            sellers: Some(vec![seller("s1")]),
            products: None,
            purchase_records: Some(vec![]),
        };
        let err = SalesAggregator::new()
            .run(&data, &ScoringOptions::default())
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput(msg) if msg.contains("products")));
    }

    #[test]
    fn missing_bonus_function_is_invalid_options() {
        let data = SalesData::new(vec![seller("s1")], vec![], vec![]);
        let options = ScoringOptions::empty().with_revenue(simple_revenue);
        let err = SalesAggregator::new().run(&data, &options).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidOptions(_)));
    }

    #[test]
    fn custom_scoring_functions_are_used() {
        let data = SalesData::new(
            vec![seller("s1")],
            vec![product("P", dec!(3))],
            vec![record("s1", vec![item("P", 2, dec!(50), dec!(10))])],
        );
        // Gross revenue, ignoring the discount.
        let options = ScoringOptions::empty()
            .with_revenue(|item: &LineItem, _: &Product| {
                item.sale_price.checked_mul(Decimal::from(item.quantity))
            })
            .with_bonus(bonus_by_profit);

        let rows = SalesAggregator::new().run(&data, &options).unwrap();
        assert_eq!(rows[0].revenue, dec!(20));
        // Default profit: 10 * 0.5 * 2 - 3 * 2
        assert_eq!(rows[0].profit, dec!(4));
    }

    #[test]
    fn line_item_overflow_is_invalid_input() {
        let data = SalesData::new(
            vec![seller("s1")],
            vec![product("P", dec!(1))],
            vec![record("s1", vec![item("P", 4_000_000_000, Decimal::ZERO, dec!(50000000000000000000))])],
        );
        let err = SalesAggregator::new()
            .run(&data, &ScoringOptions::default())
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput(msg) if msg.contains("revenue")));
    }

    #[test]
    fn accumulated_overflow_is_invalid_input() {
        let data = SalesData::new(
            vec![seller("s1")],
            vec![product("P", Decimal::ZERO)],
            vec![
                record("s1", vec![item("P", 1, Decimal::ZERO, Decimal::MAX)]),
                record("s1", vec![item("P", 1, Decimal::ZERO, Decimal::MAX)]),
            ],
        );
        let err = SalesAggregator::new()
            .run(&data, &ScoringOptions::default())
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput(_)));
    }
}
