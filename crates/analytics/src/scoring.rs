//! Pluggable pricing and bonus policies.
//!
//! The aggregator never hardcodes how revenue, profit or bonuses are computed.
//! It receives a [`ScoringOptions`] value holding three function slots and
//! invokes whatever the caller put there. The functions in this module are the
//! built-in defaults.
//!
//! Every scoring function returns `None` when its result does not fit in a
//! `Decimal`; the aggregator reports that as invalid input.

use crate::error::AnalyticsError;
use crate::report::round_money;
use crate::stat::SellerStat;
use configuration::BonusTiers;
use core_types::{LineItem, Product};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

/// Computes the revenue of a single line item.
pub type RevenueFn = Arc<dyn Fn(&LineItem, &Product) -> Option<Decimal> + Send + Sync>;

/// Computes the profit of a single line item.
pub type ProfitFn = Arc<dyn Fn(&LineItem, &Product) -> Option<Decimal> + Send + Sync>;

/// Computes the bonus of a seller from its rank, the number of ranked sellers
/// and its accumulated totals.
pub type BonusFn = Arc<dyn Fn(usize, usize, &SellerStat) -> Option<Decimal> + Send + Sync>;

/// `sale_price * quantity * (1 - discount / 100)`, rounded to cents.
///
/// The product is part of the signature so that alternative policies can use
/// catalog data; this one ignores it.
pub fn simple_revenue(item: &LineItem, _product: &Product) -> Option<Decimal> {
    item.sale_price
        .checked_mul(Decimal::from(item.quantity))?
        .checked_mul(item.discount_multiplier())
        .map(round_money)
}

/// Discounted sale value minus the cost basis. Left unrounded; the report row
/// rounds the accumulated total once.
pub fn simple_profit(item: &LineItem, product: &Product) -> Option<Decimal> {
    let quantity = Decimal::from(item.quantity);
    let sold = item
        .sale_price
        .checked_mul(item.discount_multiplier())?
        .checked_mul(quantity)?;
    let cost = product.purchase_price.checked_mul(quantity)?;
    sold.checked_sub(cost)
}

/// Rank-based bonus using the default tier rates.
pub fn bonus_by_profit(index: usize, total: usize, seller: &SellerStat) -> Option<Decimal> {
    tiered_bonus(&BonusTiers::default(), index, total, seller.profit)
}

/// Applies the tier table, first match wins:
/// rank 0, then ranks 1 and 2, then the last rank, then everyone else.
///
/// A single seller is both first and last and takes the rank 0 rate.
pub fn tiered_bonus(
    tiers: &BonusTiers,
    index: usize,
    total: usize,
    profit: Decimal,
) -> Option<Decimal> {
    let rate = match index {
        0 => tiers.top_rate,
        1 | 2 => tiers.runner_up_rate,
        i if i + 1 == total => Decimal::ZERO,
        _ => tiers.default_rate,
    };
    profit.checked_mul(rate)
}

/// The three scoring slots handed to [`crate::SalesAggregator::run`].
///
/// `revenue` and `bonus` are mandatory; an empty `profit` slot falls back to
/// [`simple_profit`].
#[derive(Clone)]
pub struct ScoringOptions {
    pub revenue: Option<RevenueFn>,
    pub profit: Option<ProfitFn>,
    pub bonus: Option<BonusFn>,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            revenue: Some(Arc::new(simple_revenue)),
            profit: Some(Arc::new(simple_profit)),
            bonus: Some(Arc::new(bonus_by_profit)),
        }
    }
}

impl ScoringOptions {
    /// Options with every slot empty. Only useful as a starting point for the
    /// `with_*` builders.
    pub fn empty() -> Self {
        Self {
            revenue: None,
            profit: None,
            bonus: None,
        }
    }

    /// Default pricing with the bonus computed from configured tier rates.
    pub fn from_bonus_tiers(tiers: BonusTiers) -> Self {
        Self::default().with_bonus(move |index, total, seller: &SellerStat| {
            tiered_bonus(&tiers, index, total, seller.profit)
        })
    }

    pub fn with_revenue<F>(mut self, f: F) -> Self
    where
        F: Fn(&LineItem, &Product) -> Option<Decimal> + Send + Sync + 'static,
    {
        self.revenue = Some(Arc::new(f));
        self
    }

    pub fn with_profit<F>(mut self, f: F) -> Self
    where
        F: Fn(&LineItem, &Product) -> Option<Decimal> + Send + Sync + 'static,
    {
        self.profit = Some(Arc::new(f));
        self
    }

    pub fn with_bonus<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, usize, &SellerStat) -> Option<Decimal> + Send + Sync + 'static,
    {
        self.bonus = Some(Arc::new(f));
        self
    }

    /// Checks the mandatory slots and fills in the profit default.
    pub(crate) fn resolve(&self) -> Result<Scoring, AnalyticsError> {
        let revenue = self.revenue.clone().ok_or_else(|| {
            AnalyticsError::InvalidOptions("revenue function is not set".to_string())
        })?;
        let bonus = self.bonus.clone().ok_or_else(|| {
            AnalyticsError::InvalidOptions("bonus function is not set".to_string())
        })?;
        let profit: ProfitFn = match &self.profit {
            Some(profit) => Arc::clone(profit),
            None => Arc::new(simple_profit),
        };

        Ok(Scoring {
            revenue,
            profit,
            bonus,
        })
    }
}

impl fmt::Debug for ScoringOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringOptions")
            .field("revenue", &self.revenue.is_some())
            .field("profit", &self.profit.is_some())
            .field("bonus", &self.bonus.is_some())
            .finish()
    }
}

/// Scoring functions resolved for a single run.
pub(crate) struct Scoring {
    pub revenue: RevenueFn,
    pub profit: ProfitFn,
    pub bonus: BonusFn,
}
