use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A seller as it appears in the input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Seller {
    /// The display name used in the report, e.g. "Alexey Petrov".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A catalog entry. Only the fields needed for pricing are kept;
/// anything else in the source catalog is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    /// The cost basis of a single unit.
    pub purchase_price: Decimal,
}

/// One position inside a purchase record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
    /// Discount in percent (0-100). Absent means no discount.
    #[serde(default)]
    pub discount: Decimal,
    /// The per-unit price before discount.
    pub sale_price: Decimal,
}

impl LineItem {
    /// The factor applied to the sale price, `1 - discount / 100`.
    pub fn discount_multiplier(&self) -> Decimal {
        Decimal::ONE - self.discount / Decimal::ONE_HUNDRED
    }
}

/// A single receipt: one seller, an ordered list of line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub seller_id: String,
    pub items: Vec<LineItem>,
}

/// The normalized input document.
///
/// Each collection is optional at the type level so that a document missing one
/// of them can still be deserialized and then rejected with a precise error by
/// the aggregator, rather than failing inside serde.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesData {
    pub sellers: Option<Vec<Seller>>,
    pub products: Option<Vec<Product>>,
    pub purchase_records: Option<Vec<PurchaseRecord>>,
}

impl SalesData {
    /// Builds a complete document from the three collections.
    pub fn new(
        sellers: Vec<Seller>,
        products: Vec<Product>,
        purchase_records: Vec<PurchaseRecord>,
    ) -> Self {
        Self {
            sellers: Some(sellers),
            products: Some(products),
            purchase_records: Some(purchase_records),
        }
    }
}
