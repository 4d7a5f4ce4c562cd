//! Counter sales endpoints.

use serde_json::{Map, Value};

use super::{path_segment, query_string};
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{Paginated, SalesQuery, SellTicketsRequest, TicketSale};

const SALES_ENDPOINT: &str = "/tickets/sales";

impl ApiClient {
    /// Sells tickets at the counter, issuing one ticket per quantity unit.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error, including sold-out tiers and failed
    /// wallet charges.
    pub async fn sell_tickets(&self, request: &SellTicketsRequest) -> Result<TicketSale> {
        self.post(&format!("{SALES_ENDPOINT}/sell"), request).await
    }

    /// Lists sales, filtered and paginated by `query`.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn sales(&self, query: &SalesQuery) -> Result<Paginated<TicketSale>> {
        self.get(&format!("{SALES_ENDPOINT}{}", query_string(&query.pairs())))
            .await
    }

    /// Fetches one sale.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn sale(&self, id: &str) -> Result<TicketSale> {
        self.get(&format!("{SALES_ENDPOINT}/{}", path_segment(id)))
            .await
    }

    /// Refunds a whole sale, voiding its tickets.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error, including rejection of already
    /// refunded sales.
    pub async fn refund_sale(&self, id: &str, reason: Option<&str>) -> Result<TicketSale> {
        let mut body = Map::new();
        if let Some(reason) = reason {
            body.insert("reason".to_owned(), Value::String(reason.to_owned()));
        }
        self.post(
            &format!("{SALES_ENDPOINT}/{}/refund", path_segment(id)),
            &Value::Object(body),
        )
        .await
    }
}
