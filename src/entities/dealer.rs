//! SeaORM Entity for Dealers
//!
//! The salesperson/channel-partner context an opportunity is created under.
//! The natural key is the (dealer_id, dealer_code, opportunity_owner) triple,
//! enforced by a unique index; dealer_id itself is caller-supplied.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "dealer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub dealer_id: String,
    pub dealer_code: String,
    pub opportunity_owner: String,
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
