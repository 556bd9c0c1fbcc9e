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
        manager
            .create_table(
                Table::create()
                    .table(Data::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Data::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Data::Worker).string().not_null())
                    .col(ColumnDef::new(Data::Status).string().not_null())
                    .col(ColumnDef::new(Data::Data).json())
                    .col(
                        ColumnDef::new(Data::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_data_worker")
                    .table(Data::Table)
                    .col(Data::Worker)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_data_status")
                    .table(Data::Table)
                    .col(Data::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_data_created_at")
                    .table(Data::Table)
                    .col(Data::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Data::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Data {
    Table,
    Id,
    Worker,
    Status,
    Data,
    CreatedAt,
}
