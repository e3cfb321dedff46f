use crate::error::AnalyticsError;
use core_types::SalesData;

/// Parses an input document of the form
/// `{ "sellers": [...], "products": [...], "purchase_records": [...] }`.
///
/// Malformed JSON, or a collection that is not an array, is reported as
/// `InvalidInput`. Absent collections parse to `None` and are rejected later
/// by the aggregator.
pub fn parse_sales_data(json: &str) -> Result<SalesData, AnalyticsError> {
    serde_json::from_str(json).map_err(|e| AnalyticsError::InvalidInput(e.to_string()))
}
