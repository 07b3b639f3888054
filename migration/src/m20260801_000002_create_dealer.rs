use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create dealer table
        manager
            .create_table(
                Table::create()
                    .table(Dealer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dealer::DealerId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Dealer::DealerCode)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Dealer::OpportunityOwner)
                            .string_len(255)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index on the dealer natural key (dealer_id, dealer_code, opportunity_owner)
        manager
            .create_index(
                Index::create()
                    .name("idx_dealer_natural_key")
                    .table(Dealer::Table)
                    .col(Dealer::DealerId)
                    .col(Dealer::DealerCode)
                    .col(Dealer::OpportunityOwner)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Dealer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Dealer {
    Table,
    DealerId,
    DealerCode,
    OpportunityOwner,
}
