//! Find-or-create resolution for accounts and dealers.
//!
//! Both resolvers are generic over `ConnectionTrait` so they run inside the
//! intake transaction. Inserts use `ON CONFLICT DO NOTHING` against the
//! natural-key uniqueness constraint; `DbErr::RecordNotInserted` means a
//! concurrent intake won the race, in which case the winner is re-fetched
//! instead of surfacing an error.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::prelude::{Account, Dealer};
use crate::entities::{account, dealer};
use crate::error::ApiError;

/// Natural key identifying a dealer; dealer_id is caller-supplied.
#[derive(Debug, Clone, Copy)]
pub struct DealerKey<'a> {
    pub dealer_id: &'a str,
    pub dealer_code: &'a str,
    pub opportunity_owner: &'a str,
}

/// Look up an account by its exact name, creating it with a generated id if
/// absent. Idempotent per name.
pub async fn resolve_account<C>(conn: &C, account_name: &str) -> Result<account::Model, ApiError>
where
    C: ConnectionTrait,
{
    if let Some(existing) = Account::find()
        .filter(account::Column::AccountName.eq(account_name))
        .one(conn)
        .await?
    {
        debug!(account_id = %existing.account_id, "found existing account");
        return Ok(existing);
    }

    let created = account::Model {
        account_id: Uuid::new_v4().to_string(),
        account_name: account_name.to_owned(),
    };

    let insert = Account::insert(account::ActiveModel {
        account_id: Set(created.account_id.clone()),
        account_name: Set(created.account_name.clone()),
    })
    .on_conflict(
        OnConflict::column(account::Column::AccountName)
            .do_nothing()
            .to_owned(),
    )
    .exec(conn)
    .await;

    match insert {
        Ok(_) => {
            info!(account_id = %created.account_id, "created new account");
            Ok(created)
        }
        // A concurrent intake inserted the same name first; use its row.
        Err(DbErr::RecordNotInserted) => Account::find()
            .filter(account::Column::AccountName.eq(account_name))
            .one(conn)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(format!("account '{account_name}' vanished after conflict"))
            }),
        Err(e) => Err(e.into()),
    }
}

/// Look up a dealer by its full natural key, creating it with the
/// caller-supplied dealer_id if absent.
pub async fn resolve_dealer<C>(conn: &C, key: DealerKey<'_>) -> Result<dealer::Model, ApiError>
where
    C: ConnectionTrait,
{
    if let Some(existing) = find_dealer(conn, key).await? {
        debug!(dealer_id = %existing.dealer_id, "found existing dealer");
        return Ok(existing);
    }

    let created = dealer::Model {
        dealer_id: key.dealer_id.to_owned(),
        dealer_code: key.dealer_code.to_owned(),
        opportunity_owner: key.opportunity_owner.to_owned(),
    };

    let insert = Dealer::insert(dealer::ActiveModel {
        dealer_id: Set(created.dealer_id.clone()),
        dealer_code: Set(created.dealer_code.clone()),
        opportunity_owner: Set(created.opportunity_owner.clone()),
    })
    .on_conflict(
        OnConflict::column(dealer::Column::DealerId)
            .do_nothing()
            .to_owned(),
    )
    .exec(conn)
    .await;

    match insert {
        Ok(_) => {
            info!(dealer_id = %created.dealer_id, "created new dealer");
            Ok(created)
        }
        // dealer_id already taken: either a concurrent intake with the same
        // key, or the id is registered under different credentials.
        Err(DbErr::RecordNotInserted) => find_dealer(conn, key).await?.ok_or_else(|| {
            ApiError::Internal(format!(
                "dealer_id '{}' is already registered with different credentials",
                key.dealer_id
            ))
        }),
        Err(e) => Err(e.into()),
    }
}

/// Point lookup of a dealer row matching the full credential triple.
pub async fn find_dealer<C>(conn: &C, key: DealerKey<'_>) -> Result<Option<dealer::Model>, DbErr>
where
    C: ConnectionTrait,
{
    Dealer::find()
        .filter(dealer::Column::DealerId.eq(key.dealer_id))
        .filter(dealer::Column::DealerCode.eq(key.dealer_code))
        .filter(dealer::Column::OpportunityOwner.eq(key.opportunity_owner))
        .one(conn)
        .await
}
