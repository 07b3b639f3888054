//! Request/response DTOs for the customer (opportunity) endpoints.
//!
//! Response field names and date formatting mirror the persisted record:
//! dates are rendered as "YYYY-MM-DD HH:MM:SS" strings and the cached
//! currency conversions are nested under `currency_conversions`.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::opportunity;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Loosely-typed intake payload; required-field validation happens in the
/// intake service, not in deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCustomerRequest {
    pub account_name: Option<String>,
    pub dealer_id: Option<String>,
    pub dealer_code: Option<String>,
    pub opportunity_owner: Option<String>,
    pub opportunity_name: Option<String>,
    pub close_date: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub stage: Option<String>,
    pub probability: Option<i32>,
    pub next_step: Option<String>,
}

/// Cached conversion results copied from the opportunity row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConversions {
    pub usd: Option<Decimal>,
    pub aus: Option<Decimal>,
    pub cad: Option<Decimal>,
}

/// Fully serialized opportunity, including the owning account's name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub opportunity_id: String,
    pub opportunity_name: String,
    pub account_id: String,
    pub account_name: Option<String>,
    pub close_date: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub dealer_id: String,
    pub dealer_code: String,
    pub opportunity_owner: String,
    pub stage: String,
    pub probability: Option<i32>,
    pub next_step: Option<String>,
    pub created_date: String,
    pub amount_in_words: String,
    pub currency_conversions: CurrencyConversions,
}

impl CustomerDetails {
    pub fn from_model(model: opportunity::Model, account_name: Option<String>) -> Self {
        Self {
            opportunity_id: model.opportunity_id,
            opportunity_name: model.opportunity_name,
            account_id: model.account_id,
            account_name,
            close_date: model.close_date.map(format_naive_datetime),
            amount: model.amount,
            description: model.description,
            dealer_id: model.dealer_id,
            dealer_code: model.dealer_code,
            opportunity_owner: model.opportunity_owner,
            stage: model.stage,
            probability: model.probability,
            next_step: model.next_step,
            created_date: format_datetime(model.created_date),
            amount_in_words: model.amount_in_words,
            currency_conversions: CurrencyConversions {
                usd: model.usd,
                aus: model.aus,
                cad: model.cad,
            },
        }
    }
}

fn format_naive_datetime(value: NaiveDateTime) -> String {
    value.format(DATE_FORMAT).to_string()
}

fn format_datetime(value: DateTime<FixedOffset>) -> String {
    value.format(DATE_FORMAT).to_string()
}

/// Query parameters shared by the read endpoints. Missing credentials are
/// treated as a non-matching dealer (401), not a malformed request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerListQuery {
    pub dealer_id: Option<String>,
    pub dealer_code: Option<String>,
    pub opportunity_owner: Option<String>,
    pub opportunity_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SingleCustomerQuery {
    pub dealer_id: Option<String>,
    pub dealer_code: Option<String>,
    pub opportunity_owner: Option<String>,
    pub opportunity_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomerResponse {
    pub message: String,
    pub customer_details: CustomerDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomersResponse {
    pub message: String,
    pub customers: Vec<CustomerDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleCustomerResponse {
    pub message: String,
    pub customer: CustomerDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
