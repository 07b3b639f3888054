//! SeaORM Entity for Opportunities
//!
//! The central record of the system: one row per successful intake call.
//! Read-only after creation; derived fields (stage, amount_in_words, usd/aus/cad)
//! are computed once at write time and never recomputed on read.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "opportunity")]
pub struct Model {
    /// Generated uuid (v7, time-ordered) assigned at intake
    #[sea_orm(primary_key, auto_increment = false)]
    pub opportunity_id: String,
    pub opportunity_name: String,
    pub account_id: String,
    /// Parsed from "YYYY-MM-DD HH:MM:SS"; absent when the deal is not closed
    pub close_date: Option<DateTime>,
    /// Amount in the base currency (INR)
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Option<Decimal>,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,
    /// Denormalized from the resolved dealer at creation, not re-joined on read
    pub dealer_id: String,
    pub dealer_code: String,
    pub opportunity_owner: String,
    pub stage: String,
    pub probability: Option<i32>,
    pub next_step: Option<String>,
    pub created_date: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text")]
    pub amount_in_words: String,
    pub usd: Option<Decimal>,
    pub aus: Option<Decimal>,
    pub cad: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::AccountId"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::dealer::Entity",
        from = "Column::DealerId",
        to = "super::dealer::Column::DealerId"
    )]
    Dealer,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::dealer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dealer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
