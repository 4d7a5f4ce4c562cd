//! Developer CLI for the TicketKit backend.
//!
//! Tokens are kept in a JSON file under the platform data directory, so a
//! login survives across invocations until it is revoked or expires.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::{eyre, WrapErr};
use serde_json::to_string_pretty;
use ticketkit_core::storage::FileTokenStore;
use ticketkit_core::types::{
    CheckInRequest, EventQuery, EventStatus, LoginCredentials, PaymentMethod, SalesQuery,
    ScanQuery, SellTicketsRequest, StatsQuery, ValidateTicketRequest,
};
use ticketkit_core::{ApiClient, Config, Session, SessionEvents};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ticketkit", version, about)]
struct Cli {
    /// Backend base URL, e.g. http://localhost:5000/api
    #[arg(long, global = true, env = "TICKETKIT_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in with an email or phone number.
    Login {
        /// Email address or phone number.
        identifier: String,
        /// Account password.
        #[arg(long, env = "TICKETKIT_PASSWORD")]
        password: String,
    },
    /// Log out and drop the stored tokens.
    Logout,
    /// Show the authenticated user's profile.
    Me,
    /// List events, optionally filtered.
    Events {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// draft, published, cancelled or completed.
        #[arg(long)]
        status: Option<EventStatus>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one event.
    Event { id: String },
    /// Put an event on sale.
    Publish { id: String },
    /// Take an event off sale.
    Unpublish { id: String },
    /// Sell tickets at the counter.
    Sell {
        #[arg(long)]
        event: String,
        #[arg(long)]
        ticket_type: String,
        #[arg(long)]
        quantity: u32,
        #[arg(long)]
        customer_name: String,
        #[arg(long)]
        customer_phone: String,
        /// cash or wallet.
        #[arg(long)]
        payment_method: PaymentMethod,
        #[arg(long)]
        wallet_card: Option<String>,
        #[arg(long)]
        wallet_pin: Option<String>,
    },
    /// List sales, optionally filtered.
    Sales {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        event: Option<String>,
        #[arg(long)]
        payment_method: Option<PaymentMethod>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Refund a sale.
    Refund {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Check a ticket without consuming it.
    Validate { ticket_id: String },
    /// Admit a ticket at the gate.
    CheckIn {
        ticket_id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List scan records.
    Scans {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        event: Option<String>,
    },
    /// Dashboard headline numbers.
    Dashboard {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Revenue breakdowns.
    Revenue {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        event: Option<String>,
    },
    /// Per-event analytics.
    Analytics {
        event_id: String,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Export sales as CSV.
    ExportSales {
        /// Where to write the CSV.
        #[arg(long, short)]
        output: PathBuf,
        #[arg(long)]
        event: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
}

struct LoginHint;

impl SessionEvents for LoginHint {
    fn on_login_required(&self) {
        eprintln!("session ended; run `ticketkit login <identifier>` to sign in again");
    }
}

fn token_path() -> eyre::Result<PathBuf> {
    let dir = dirs::data_dir().ok_or_else(|| eyre!("no platform data directory available"))?;
    Ok(dir.join("ticketkit").join("tokens.json"))
}

fn print_json<T: serde::Serialize>(value: &T) -> eyre::Result<()> {
    println!("{}", to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let config = match &cli.api_url {
        Some(url) => Config::new(url),
        None => Config::from_env(),
    };

    let store = Arc::new(FileTokenStore::new(token_path()?));
    let client = Arc::new(ApiClient::new(&config, store).wrap_err("failed to open token store")?);
    client.set_session_events(Arc::new(LoginHint));
    let session = Session::new(Arc::clone(&client));

    match cli.command {
        Command::Login {
            identifier,
            password,
        } => {
            let user = session
                .login(&LoginCredentials {
                    identifier,
                    password,
                })
                .await?;
            println!("logged in as {} ({})", user.business_name, user.role);
        }
        Command::Logout => {
            session.logout().await;
            println!("logged out");
        }
        Command::Me => print_json(&client.me().await?)?,
        Command::Events {
            page,
            limit,
            status,
            search,
        } => {
            let page = client
                .events(&EventQuery {
                    page,
                    limit,
                    status,
                    search,
                })
                .await?;
            print_json(&page)?;
        }
        Command::Event { id } => print_json(&client.event(&id).await?)?,
        Command::Publish { id } => print_json(&client.publish_event(&id).await?)?,
        Command::Unpublish { id } => print_json(&client.unpublish_event(&id).await?)?,
        Command::Sell {
            event,
            ticket_type,
            quantity,
            customer_name,
            customer_phone,
            payment_method,
            wallet_card,
            wallet_pin,
        } => {
            let sale = client
                .sell_tickets(&SellTicketsRequest {
                    event_id: event,
                    ticket_type_id: ticket_type,
                    quantity,
                    customer_name,
                    customer_phone,
                    payment_method,
                    wallet_card_number: wallet_card,
                    wallet_pin,
                })
                .await?;
            print_json(&sale)?;
        }
        Command::Sales {
            page,
            event,
            payment_method,
            start_date,
            end_date,
        } => {
            let sales = client
                .sales(&SalesQuery {
                    page,
                    event_id: event,
                    payment_method,
                    start_date,
                    end_date,
                    ..SalesQuery::default()
                })
                .await?;
            print_json(&sales)?;
        }
        Command::Refund { id, reason } => {
            print_json(&client.refund_sale(&id, reason.as_deref()).await?)?;
        }
        Command::Validate { ticket_id } => {
            let verdict = client
                .validate_ticket(&ValidateTicketRequest { ticket_id })
                .await?;
            print_json(&verdict)?;
        }
        Command::CheckIn { ticket_id, notes } => {
            let record = client.check_in(&CheckInRequest { ticket_id, notes }).await?;
            print_json(&record)?;
        }
        Command::Scans { page, event } => {
            let scans = client
                .scans(&ScanQuery {
                    page,
                    event_id: event,
                    ..ScanQuery::default()
                })
                .await?;
            print_json(&scans)?;
        }
        Command::Dashboard {
            start_date,
            end_date,
        } => {
            let stats = client
                .dashboard_stats(&StatsQuery {
                    start_date,
                    end_date,
                    event_id: None,
                })
                .await?;
            print_json(&stats)?;
        }
        Command::Revenue {
            start_date,
            end_date,
            event,
        } => {
            let stats = client
                .revenue_stats(&StatsQuery {
                    start_date,
                    end_date,
                    event_id: event,
                })
                .await?;
            print_json(&stats)?;
        }
        Command::Analytics {
            event_id,
            start_date,
            end_date,
        } => {
            let analytics = client
                .event_analytics(&event_id, start_date.as_deref(), end_date.as_deref())
                .await?;
            print_json(&analytics)?;
        }
        Command::ExportSales {
            output,
            event,
            start_date,
            end_date,
        } => {
            let bytes = client
                .export_sales_csv(&SalesQuery {
                    event_id: event,
                    start_date,
                    end_date,
                    ..SalesQuery::default()
                })
                .await?;
            std::fs::write(&output, bytes)
                .wrap_err_with(|| format!("failed to write {}", output.display()))?;
            println!("wrote {}", output.display());
        }
    }

    Ok(())
}
