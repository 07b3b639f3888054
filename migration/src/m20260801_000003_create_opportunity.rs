use sea_orm_migration::prelude::*;

use crate::m20260801_000001_create_account::Account;
use crate::m20260801_000002_create_dealer::Dealer;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create opportunity table
        manager
            .create_table(
                Table::create()
                    .table(Opportunity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Opportunity::OpportunityId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Opportunity::OpportunityName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Opportunity::AccountId).string().not_null())
                    .col(ColumnDef::new(Opportunity::CloseDate).timestamp().null())
                    .col(
                        ColumnDef::new(Opportunity::Amount)
                            .decimal_len(10, 2)
                            .null(),
                    )
                    .col(ColumnDef::new(Opportunity::Description).text().null())
                    .col(ColumnDef::new(Opportunity::DealerId).string().not_null())
                    .col(
                        ColumnDef::new(Opportunity::DealerCode)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Opportunity::OpportunityOwner)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Opportunity::Stage)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Opportunity::Probability).integer().null())
                    .col(
                        ColumnDef::new(Opportunity::NextStep)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Opportunity::CreatedDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Opportunity::AmountInWords)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Opportunity::Usd).decimal_len(20, 2).null())
                    .col(ColumnDef::new(Opportunity::Aus).decimal_len(20, 2).null())
                    .col(ColumnDef::new(Opportunity::Cad).decimal_len(20, 2).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunity_account")
                            .from(Opportunity::Table, Opportunity::AccountId)
                            .to(Account::Table, Account::AccountId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opportunity_dealer")
                            .from(Opportunity::Table, Opportunity::DealerId)
                            .to(Dealer::Table, Dealer::DealerId),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on dealer_code for the list-by-dealer endpoint
        manager
            .create_index(
                Index::create()
                    .name("idx_opportunity_dealer_code")
                    .table(Opportunity::Table)
                    .col(Opportunity::DealerCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Opportunity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Opportunity {
    Table,
    OpportunityId,
    OpportunityName,
    AccountId,
    CloseDate,
    Amount,
    Description,
    DealerId,
    DealerCode,
    OpportunityOwner,
    Stage,
    Probability,
    NextStep,
    CreatedDate,
    AmountInWords,
    Usd,
    Aus,
    Cad,
}
