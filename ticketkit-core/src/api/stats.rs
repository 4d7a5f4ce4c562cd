//! Statistics and analytics endpoints.

use super::{path_segment, query_string};
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{DashboardStats, EventAnalytics, RevenueStats, SalesStats, StatsQuery};

const STATS_ENDPOINT: &str = "/tickets/stats";

impl ApiClient {
    /// Headline numbers for the dashboard landing page.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn dashboard_stats(&self, query: &StatsQuery) -> Result<DashboardStats> {
        self.get(&format!(
            "{STATS_ENDPOINT}/dashboard{}",
            query_string(&query.pairs())
        ))
        .await
    }

    /// Aggregate sales figures for the selected period.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn sales_stats(&self, query: &StatsQuery) -> Result<SalesStats> {
        self.get(&format!(
            "{STATS_ENDPOINT}/sales{}",
            query_string(&query.pairs())
        ))
        .await
    }

    /// Revenue breakdowns for the selected period.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn revenue_stats(&self, query: &StatsQuery) -> Result<RevenueStats> {
        self.get(&format!(
            "{STATS_ENDPOINT}/revenue{}",
            query_string(&query.pairs())
        ))
        .await
    }

    /// Per-event analytics over an optional date range.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn event_analytics(
        &self,
        event_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<EventAnalytics> {
        let query = query_string(&[
            ("startDate", start_date.map(str::to_owned)),
            ("endDate", end_date.map(str::to_owned)),
        ]);
        self.get(&format!(
            "{STATS_ENDPOINT}/events/{}{query}",
            path_segment(event_id)
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockito::Server;

    use super::*;
    use crate::config::Config;
    use crate::storage::MemoryTokenStore;

    fn client_for(server: &Server) -> ApiClient {
        ApiClient::new(&Config::new(server.url()), Arc::new(MemoryTokenStore::new())).unwrap()
    }

    #[tokio::test]
    async fn dashboard_stats_carry_optional_trend_fields() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/tickets/stats/dashboard?startDate=2026-08-01")
            .with_status(200)
            .with_body(
                r#"{
                    "data": {
                        "totalRevenue": 1500.0,
                        "ticketsSold": 80,
                        "activeEvents": 3,
                        "todayScans": 12,
                        "revenueChange": 4.2
                    }
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let stats = client
            .dashboard_stats(&StatsQuery {
                start_date: Some("2026-08-01".to_owned()),
                ..StatsQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(stats.tickets_sold, 80);
        assert_eq!(stats.revenue_change, Some(4.2));
        assert_eq!(stats.scans_change, None);
    }

    #[tokio::test]
    async fn event_analytics_hits_the_event_scoped_route() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/tickets/stats/events/e1?endDate=2026-08-31")
            .with_status(200)
            .with_body(
                r#"{
                    "data": {
                        "event": {
                            "id": "e1",
                            "name": "Jazz Night",
                            "venue": "Main Hall",
                            "eventDate": "2026-09-01",
                            "status": "published"
                        },
                        "sales": {
                            "totalSales": 10,
                            "totalRevenue": 500.0,
                            "ticketsSold": 20,
                            "checkedIn": 5,
                            "checkInRate": 25.0
                        },
                        "ticketTypes": []
                    }
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let analytics = client
            .event_analytics("e1", None, Some("2026-08-31"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(analytics.sales.checked_in, 5);
        assert_eq!(analytics.event.name, "Jazz Night");
    }
}
