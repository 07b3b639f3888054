//! Dealer-credential-gated opportunity reads.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::debug;

use crate::entities::opportunity;
use crate::entities::prelude::{Account, Opportunity};
use crate::error::ApiError;
use crate::models::opportunity::CustomerDetails;
use crate::services::entity_resolver::{self, DealerKey};

/// All opportunities for a dealer code. The gate requires an exact match on
/// the full credential triple; the result filter is by dealer_code only.
/// An optional opportunity_name narrows the list to exact name matches.
pub async fn list_by_dealer(
    db: &DatabaseConnection,
    key: DealerKey<'_>,
    opportunity_name: Option<&str>,
) -> Result<Vec<CustomerDetails>, ApiError> {
    validate_dealer(db, key).await?;

    let rows = Opportunity::find()
        .filter(opportunity::Column::DealerCode.eq(key.dealer_code))
        .find_also_related(Account)
        .all(db)
        .await?;

    debug!(
        dealer_code = key.dealer_code,
        count = rows.len(),
        "fetched opportunities for dealer"
    );

    Ok(rows
        .into_iter()
        .filter(|(row, _)| match opportunity_name {
            Some(name) => row.opportunity_name == name,
            None => true,
        })
        .map(|(row, account)| CustomerDetails::from_model(row, account.map(|a| a.account_name)))
        .collect())
}

/// One opportunity by id, behind the same dealer gate. The row itself is not
/// re-checked against the resolved dealer.
pub async fn get_by_id(
    db: &DatabaseConnection,
    key: DealerKey<'_>,
    opportunity_id: &str,
) -> Result<CustomerDetails, ApiError> {
    validate_dealer(db, key).await?;

    let (row, account) = Opportunity::find_by_id(opportunity_id)
        .find_also_related(Account)
        .one(db)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(CustomerDetails::from_model(
        row,
        account.map(|a| a.account_name),
    ))
}

async fn validate_dealer(db: &DatabaseConnection, key: DealerKey<'_>) -> Result<(), ApiError> {
    match entity_resolver::find_dealer(db, key).await? {
        Some(_) => Ok(()),
        None => {
            debug!(
                dealer_id = key.dealer_id,
                dealer_code = key.dealer_code,
                "invalid dealer information"
            );
            Err(ApiError::Unauthorized)
        }
    }
}
