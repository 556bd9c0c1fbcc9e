// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Singleton row, always id = 1
        manager
            .create_table(
                Table::create()
                    .table(Bot::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bot::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Bot::Timeout).big_integer().not_null().default(10))
                    .col(
                        ColumnDef::new(Bot::WorkerLimit)
                            .big_integer()
                            .not_null()
                            .default(15),
                    )
                    .col(
                        ColumnDef::new(Bot::Started)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Bot::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bot::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bot {
    Table,
    Id,
    Timeout,
    WorkerLimit,
    Started,
    UpdatedAt,
}
