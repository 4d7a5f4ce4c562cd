//! CSV export endpoint.

use super::query_string;
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::SalesQuery;

const EXPORT_ENDPOINT: &str = "/tickets/export/sales";

impl ApiClient {
    /// Downloads the sales report as raw CSV bytes. Only the event,
    /// payment-method and date filters of `query` apply; pagination does
    /// not.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn export_sales_csv(&self, query: &SalesQuery) -> Result<Vec<u8>> {
        self.download(&format!(
            "{EXPORT_ENDPOINT}{}",
            query_string(&query.export_pairs())
        ))
        .await
    }
}
