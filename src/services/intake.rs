//! Opportunity intake pipeline: validation, entity resolution, derived-field
//! computation, persistence.
//!
//! All validation runs before any write. The account, dealer and opportunity
//! writes share one transaction, so a failure after the resolver steps rolls
//! the whole intake back.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use crate::entities::opportunity;
use crate::error::ApiError;
use crate::models::opportunity::{CustomerDetails, NewCustomerRequest, DATE_FORMAT};
use crate::services::{amount_words, currency, entity_resolver, stage};

/// Register a new opportunity and return its serialized form.
pub async fn register(
    db: &DatabaseConnection,
    request: NewCustomerRequest,
) -> Result<CustomerDetails, ApiError> {
    let account_name = required(&request.account_name)
        .ok_or_else(|| ApiError::MissingField("account_name is required".to_string()))?;

    let (dealer_id, dealer_code, opportunity_owner) = match (
        required(&request.dealer_id),
        required(&request.dealer_code),
        required(&request.opportunity_owner),
    ) {
        (Some(id), Some(code), Some(owner)) => (id, code, owner),
        _ => {
            return Err(ApiError::MissingField(
                "dealer_id, dealer_code, and opportunity_owner are required".to_string(),
            ))
        }
    };

    let opportunity_name = required(&request.opportunity_name)
        .ok_or_else(|| ApiError::MissingField("opportunity_name is required".to_string()))?;

    let close_date = request
        .close_date
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|raw| {
            NaiveDateTime::parse_from_str(raw, DATE_FORMAT)
                .map_err(|e| ApiError::InvalidFormat(e.to_string()))
        })
        .transpose()?;

    // Probability, when present, fully determines the stage; otherwise fall
    // back to the caller-supplied stage or "Unknown".
    let stage = match request.probability {
        Some(p) => stage::resolve_stage(p)?.to_string(),
        None => request
            .stage
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
    };

    let conversions = request.amount.map(currency::convert);
    let amount_in_words = amount_words::amount_in_words(request.amount);

    let opportunity_id = Uuid::now_v7().to_string();
    let created_date = Utc::now().fixed_offset();

    let txn = db.begin().await?;

    let account = entity_resolver::resolve_account(&txn, account_name).await?;
    let dealer = entity_resolver::resolve_dealer(
        &txn,
        entity_resolver::DealerKey {
            dealer_id,
            dealer_code,
            opportunity_owner,
        },
    )
    .await?;

    let record = opportunity::ActiveModel {
        opportunity_id: Set(opportunity_id),
        opportunity_name: Set(opportunity_name.to_owned()),
        account_id: Set(account.account_id.clone()),
        close_date: Set(close_date),
        amount: Set(request.amount),
        description: Set(request.description.clone()),
        dealer_id: Set(dealer.dealer_id.clone()),
        dealer_code: Set(dealer.dealer_code.clone()),
        opportunity_owner: Set(dealer.opportunity_owner.clone()),
        stage: Set(stage),
        probability: Set(request.probability),
        next_step: Set(request.next_step.clone()),
        created_date: Set(created_date),
        amount_in_words: Set(amount_in_words),
        usd: Set(conversions.map(|c| c.usd)),
        aus: Set(conversions.map(|c| c.aud)),
        cad: Set(conversions.map(|c| c.cad)),
    };

    let inserted = record.insert(&txn).await?;

    txn.commit().await?;

    info!(opportunity_id = %inserted.opportunity_id, "created new opportunity");

    Ok(CustomerDetails::from_model(
        inserted,
        Some(account.account_name),
    ))
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
