//! SeaORM Entity for Accounts
//!
//! A customer organization, looked up by its unique account_name.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    /// Generated uuid (v4), assigned on first intake referencing the name
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: String,
    /// Natural key; at most one account per distinct name
    #[sea_orm(unique)]
    pub account_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::opportunity::Entity")]
    Opportunity,
}

impl Related<super::opportunity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Opportunity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
