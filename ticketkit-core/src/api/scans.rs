//! Gate scanning endpoints.

use super::query_string;
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{
    CheckInRequest, Paginated, ScanQuery, ScanRecord, ValidateTicketRequest,
    ValidateTicketResponse,
};

const SCANS_ENDPOINT: &str = "/tickets/scans";

impl ApiClient {
    /// Checks a ticket's validity without consuming it.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error. An invalid ticket is not an error:
    /// the response carries the verdict.
    pub async fn validate_ticket(
        &self,
        request: &ValidateTicketRequest,
    ) -> Result<ValidateTicketResponse> {
        self.post(&format!("{SCANS_ENDPOINT}/validate"), request)
            .await
    }

    /// Admits a ticket at the gate, marking it used.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error, including rejection of already used
    /// or refunded tickets.
    pub async fn check_in(&self, request: &CheckInRequest) -> Result<ScanRecord> {
        self.post(&format!("{SCANS_ENDPOINT}/check-in"), request)
            .await
    }

    /// Lists scan records, filtered and paginated by `query`.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn scans(&self, query: &ScanQuery) -> Result<Paginated<ScanRecord>> {
        self.get(&format!("{SCANS_ENDPOINT}{}", query_string(&query.pairs())))
            .await
    }
}
