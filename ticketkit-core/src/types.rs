//! Wire types served by the ticketing backend.
//!
//! All payloads use camelCase field names on the wire; record identifiers
//! arrive as `_id`. Timestamps and dates are carried as the backend's ISO
//! strings and not interpreted client-side.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ---------------------------------------------------------------------------
// Authentication

/// Credentials accepted by the login endpoint. The identifier is an email
/// address or a phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// Email address or phone number.
    pub identifier: String,
    /// Account password.
    pub password: String,
}

/// Successful login payload: a fresh token pair plus the user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Short-lived bearer credential for API calls.
    pub access_token: String,
    /// Longer-lived credential exchanged for new access tokens.
    pub refresh_token: String,
    /// Profile of the authenticated user.
    pub user: AuthUser,
}

/// Profile of an authenticated vendor or admin account.
///
/// An immutable snapshot: it is replaced wholesale on every successful
/// fetch or login, never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Record identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Contact email, if registered with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone number, if registered with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Name of the vendor's business.
    pub business_name: String,
    /// Account role.
    pub role: UserRole,
    /// Whether the account is active.
    pub is_active: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Account role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    /// Regular vendor account managing its own events.
    Vendor,
    /// Administrative account.
    Admin,
}

// ---------------------------------------------------------------------------
// Events

/// An event with its configured ticket types and running sales totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Record identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Public event identifier.
    pub event_id: String,
    /// Owning vendor.
    pub vendor_id: String,
    /// Event name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Venue name.
    pub venue: String,
    /// Event date; for multi-day events, the start date.
    pub event_date: String,
    /// Start time; for multi-day events, a start datetime.
    pub start_time: String,
    /// End time; for multi-day events, an end datetime.
    pub end_time: String,
    /// Whether the event spans multiple days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_multi_day: Option<bool>,
    /// Total venue capacity.
    pub capacity: u32,
    /// Configured ticket types.
    pub ticket_types: Vec<TicketType>,
    /// Tickets sold across all types.
    pub total_tickets_sold: u32,
    /// Revenue across all types.
    pub total_revenue: f64,
    /// Poster image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Thumbnail image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Gallery image URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery_images: Option<Vec<String>>,
    /// QR code image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_url: Option<String>,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Creation timestamp.
    pub created_at: String,
    /// Last-update timestamp.
    pub updated_at: String,
}

/// Event lifecycle status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    /// Not yet visible to buyers.
    Draft,
    /// On sale.
    Published,
    /// Cancelled by the vendor.
    Cancelled,
    /// The event has taken place.
    Completed,
}

/// One ticket tier of an event, e.g. "VIP" or "Early Bird".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    /// Record identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Tier name, unique within the event.
    pub name: String,
    /// Price per ticket.
    pub price: f64,
    /// Total tickets of this type.
    pub quantity: u32,
    /// Number sold so far.
    pub sold: u32,
    /// Remaining tickets (`quantity - sold`).
    pub available: u32,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Manual sold-out override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sold_out: Option<bool>,
}

/// Payload for creating an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    /// Event name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Venue name.
    pub venue: String,
    /// Event date; for multi-day events, the start date.
    pub event_date: String,
    /// Start time; for multi-day events, a start datetime.
    pub start_time: String,
    /// End time; for multi-day events, an end datetime.
    pub end_time: String,
    /// Whether the event spans multiple days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_multi_day: Option<bool>,
    /// Total venue capacity.
    pub capacity: u32,
    /// Ticket tiers to create with the event.
    pub ticket_types: Vec<TicketTypeForm>,
}

/// Payload for a partial event update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    /// New event name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New venue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// New event date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    /// New start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// New end time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// New multi-day flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_multi_day: Option<bool>,
    /// New capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

/// Payload for adding a ticket tier to an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeForm {
    /// Tier name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price per ticket.
    pub price: f64,
    /// Total tickets of this type.
    pub quantity: u32,
}

/// Payload for a partial ticket-tier update; absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeUpdate {
    /// New tier name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// New total quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

// ---------------------------------------------------------------------------
// Sales

/// A completed (or refunded) ticket sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSale {
    /// Record identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Event the tickets belong to.
    pub event_id: String,
    /// Expanded event record, when the endpoint includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    /// Ticket tier sold.
    pub ticket_type_id: String,
    /// Expanded tier record, when the endpoint includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,
    /// Number of tickets in this sale.
    pub quantity: u32,
    /// Total charged.
    pub total_amount: f64,
    /// Buyer name.
    pub customer_name: String,
    /// Buyer phone number.
    pub customer_phone: String,
    /// How the sale was paid.
    pub payment_method: PaymentMethod,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// Individual tickets issued by this sale.
    pub tickets: Vec<Ticket>,
    /// Owning vendor.
    pub vendor_id: String,
    /// Seller account id.
    pub sold_by: String,
    /// Seller display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_by_name: Option<String>,
    /// Sale timestamp.
    pub created_at: String,
    /// Refund timestamp, if refunded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refunded_at: Option<String>,
    /// Refund reason, if refunded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_reason: Option<String>,
}

/// A single issued ticket; its `ticket_id` is the QR code payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Record identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Scannable ticket identifier.
    pub ticket_id: String,
    /// Sale that issued this ticket.
    pub sale_id: String,
    /// Event the ticket admits to.
    pub event_id: String,
    /// Ticket tier.
    pub ticket_type_id: String,
    /// Current state.
    pub status: TicketStatus,
    /// When the ticket was scanned, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<String>,
    /// Who scanned it, if scanned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_by: Option<String>,
    /// Issue timestamp.
    pub created_at: String,
}

/// Payment channel for a sale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the point of sale.
    Cash,
    /// The platform wallet.
    Wallet,
}

/// Payment state of a sale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting settlement.
    Pending,
    /// Settled.
    Paid,
    /// Refunded to the buyer.
    Refunded,
    /// Settlement failed.
    Failed,
}

/// State of an issued ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TicketStatus {
    /// Not yet used.
    Valid,
    /// Checked in.
    Used,
    /// Refunded.
    Refunded,
    /// Cancelled.
    Cancelled,
}

/// Payload for selling tickets at the counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellTicketsRequest {
    /// Event to sell for.
    pub event_id: String,
    /// Ticket tier to sell.
    pub ticket_type_id: String,
    /// Number of tickets.
    pub quantity: u32,
    /// Buyer name.
    pub customer_name: String,
    /// Buyer phone number.
    pub customer_phone: String,
    /// How the buyer pays.
    pub payment_method: PaymentMethod,
    /// Wallet card number, for wallet payments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_card_number: Option<String>,
    /// Wallet PIN, for wallet payments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_pin: Option<String>,
}

// ---------------------------------------------------------------------------
// Scans

/// Record of a gate scan attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    /// Record identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Scanned ticket identifier.
    pub ticket_id: String,
    /// Expanded ticket record, when the endpoint includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Ticket>,
    /// Event scanned against.
    pub event_id: String,
    /// Expanded event record, when the endpoint includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    /// Scanner account id.
    pub scanned_by: String,
    /// Scanner display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_by_name: Option<String>,
    /// Scan outcome.
    pub status: ScanStatus,
    /// Why the scan failed, for failed scans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Operator notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Scan timestamp.
    pub created_at: String,
}

/// Outcome of a scan attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScanStatus {
    /// Admitted.
    Success,
    /// Rejected.
    Failed,
}

/// Non-consuming ticket validity check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTicketRequest {
    /// Scannable ticket identifier.
    pub ticket_id: String,
}

/// Consuming gate check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    /// Scannable ticket identifier.
    pub ticket_id: String,
    /// Operator notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Result of a validity check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTicketResponse {
    /// Whether the ticket would be admitted.
    pub valid: bool,
    /// The ticket, when it was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Ticket>,
    /// The ticket's event, when found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    /// The ticket's tier, when found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,
    /// Human-readable verdict.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Statistics

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Revenue in the selected period.
    pub total_revenue: f64,
    /// Tickets sold in the selected period.
    pub tickets_sold: u32,
    /// Currently published events.
    pub active_events: u32,
    /// Scans recorded today.
    pub today_scans: u32,
    /// Revenue change versus the previous period, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_change: Option<f64>,
    /// Sales change versus the previous period, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_change: Option<f64>,
    /// Events change versus the previous period, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_change: Option<f64>,
    /// Scans change versus the previous period, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scans_change: Option<f64>,
}

/// Aggregate sales figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    /// Number of sales.
    pub total_sales: u32,
    /// Gross revenue.
    pub total_revenue: f64,
    /// Number of refunds.
    pub total_refunds: u32,
    /// Amount refunded.
    pub refunded_amount: f64,
    /// Mean sale amount.
    pub average_sale_amount: f64,
    /// Sales split by payment channel.
    pub sales_by_payment_method: SalesByPaymentMethod,
}

/// Sales count per payment channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SalesByPaymentMethod {
    /// Cash sales.
    pub cash: u32,
    /// Wallet sales.
    pub wallet: u32,
}

/// Revenue figures over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueStats {
    /// Period the figures cover.
    pub period: String,
    /// Gross revenue.
    pub total_revenue: f64,
    /// Tickets sold.
    pub tickets_sold: u32,
    /// Mean ticket price.
    pub average_ticket_price: f64,
    /// Per-event breakdown.
    pub revenue_by_event: Vec<EventRevenue>,
    /// Per-payment-channel breakdown.
    pub revenue_by_payment_method: Vec<PaymentMethodRevenue>,
    /// Per-day breakdown, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_revenue: Option<Vec<DailyRevenue>>,
}

/// Revenue attributed to one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRevenue {
    /// Event identifier.
    pub event_id: String,
    /// Event name.
    pub event_name: String,
    /// Revenue for the event.
    pub revenue: f64,
    /// Tickets sold for the event.
    pub tickets_sold: u32,
}

/// Revenue attributed to one payment channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodRevenue {
    /// Payment channel.
    pub method: PaymentMethod,
    /// Amount taken through the channel.
    pub amount: f64,
    /// Number of sales through the channel.
    pub count: u32,
}

/// Revenue for a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    /// Day the figures cover.
    pub date: String,
    /// Revenue for the day.
    pub revenue: f64,
    /// Tickets sold that day.
    pub tickets_sold: u32,
}

/// Per-event analytics: summary, sales, and tier breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAnalytics {
    /// Event summary.
    pub event: EventSummary,
    /// Sales and check-in figures.
    pub sales: EventSalesSummary,
    /// Per-tier breakdown.
    pub ticket_types: Vec<TicketTypeBreakdown>,
}

/// Condensed event description used inside analytics payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Event identifier.
    pub id: String,
    /// Event name.
    pub name: String,
    /// Venue name.
    pub venue: String,
    /// Event date.
    pub event_date: String,
    /// Lifecycle status.
    pub status: String,
}

/// Sales and attendance figures for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSalesSummary {
    /// Number of sales.
    pub total_sales: u32,
    /// Gross revenue.
    pub total_revenue: f64,
    /// Tickets sold.
    pub tickets_sold: u32,
    /// Tickets checked in.
    pub checked_in: u32,
    /// Check-in rate, in percent.
    pub check_in_rate: f64,
}

/// Sales figures for one ticket tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeBreakdown {
    /// Tier name.
    pub name: String,
    /// Price per ticket.
    pub price: f64,
    /// Total tickets of this type.
    pub quantity: u32,
    /// Number sold.
    pub sold: u32,
    /// Number remaining.
    pub available: u32,
    /// Revenue for the tier.
    pub revenue: f64,
}

// ---------------------------------------------------------------------------
// Media

/// Media attached to an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaListing {
    /// Poster image URL.
    pub poster: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail: Option<String>,
    /// Gallery image URLs.
    pub gallery: Vec<String>,
    /// QR code image URL.
    pub qrcode: Option<String>,
}

/// Media slot on an event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    /// Main poster image.
    Poster,
    /// Listing thumbnail.
    Thumbnail,
    /// Gallery image.
    Gallery,
    /// QR code image.
    Qrcode,
}

// ---------------------------------------------------------------------------
// Queries and pagination

/// Filters for listing events.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Filter by lifecycle status.
    pub status: Option<EventStatus>,
    /// Free-text search.
    pub search: Option<String>,
}

/// Filters for listing sales.
#[derive(Debug, Clone, Default)]
pub struct SalesQuery {
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Filter by event.
    pub event_id: Option<String>,
    /// Filter by payment channel.
    pub payment_method: Option<PaymentMethod>,
    /// Filter by payment state.
    pub payment_status: Option<PaymentStatus>,
    /// Inclusive start date.
    pub start_date: Option<String>,
    /// Inclusive end date.
    pub end_date: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
}

/// Filters for listing scan records.
#[derive(Debug, Clone, Default)]
pub struct ScanQuery {
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Filter by event.
    pub event_id: Option<String>,
    /// Filter by outcome.
    pub status: Option<ScanStatus>,
    /// Inclusive start date.
    pub start_date: Option<String>,
    /// Inclusive end date.
    pub end_date: Option<String>,
}

/// Period and scope selection for statistics endpoints.
#[derive(Debug, Clone, Default)]
pub struct StatsQuery {
    /// Inclusive start date.
    pub start_date: Option<String>,
    /// Inclusive end date.
    pub end_date: Option<String>,
    /// Restrict to one event.
    pub event_id: Option<String>,
}

impl EventQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("page", self.page.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("status", self.status.map(|v| v.to_string())),
            ("search", self.search.clone()),
        ]
    }
}

impl SalesQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("page", self.page.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("eventId", self.event_id.clone()),
            ("paymentMethod", self.payment_method.map(|v| v.to_string())),
            ("paymentStatus", self.payment_status.map(|v| v.to_string())),
            ("startDate", self.start_date.clone()),
            ("endDate", self.end_date.clone()),
            ("search", self.search.clone()),
        ]
    }

    // The CSV export endpoint accepts only this subset.
    pub(crate) fn export_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("eventId", self.event_id.clone()),
            ("paymentMethod", self.payment_method.map(|v| v.to_string())),
            ("startDate", self.start_date.clone()),
            ("endDate", self.end_date.clone()),
        ]
    }
}

impl ScanQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("page", self.page.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("eventId", self.event_id.clone()),
            ("status", self.status.map(|v| v.to_string())),
            ("startDate", self.start_date.clone()),
            ("endDate", self.end_date.clone()),
        ]
    }
}

impl StatsQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("startDate", self.start_date.clone()),
            ("endDate", self.end_date.clone()),
            ("eventId", self.event_id.clone()),
        ]
    }
}

/// A page of results plus its pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Records on this page.
    pub data: Vec<T>,
    /// Page bookkeeping.
    pub pagination: Pagination,
}

/// Pagination bookkeeping attached to list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, 1-based.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total matching records.
    pub total: u32,
    /// Total pages.
    pub pages: u32,
}
