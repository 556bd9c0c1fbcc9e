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
                    .table(Workers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Workers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Workers::Name).string().not_null())
                    .col(ColumnDef::new(Workers::Source).string().not_null())
                    .col(ColumnDef::new(Workers::Interval).big_integer().not_null())
                    .col(
                        ColumnDef::new(Workers::Started)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Workers::LastWorkAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Workers::CreatedAt)
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
                    .name("idx_workers_name")
                    .table(Workers::Table)
                    .col(Workers::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_workers_created_at")
                    .table(Workers::Table)
                    .col(Workers::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Selector scans started workers ordered by last_work_at
        manager
            .create_index(
                Index::create()
                    .name("idx_workers_started_last_work_at")
                    .table(Workers::Table)
                    .col(Workers::Started)
                    .col(Workers::LastWorkAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Workers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Workers {
    Table,
    Id,
    Name,
    Source,
    Interval,
    Started,
    LastWorkAt,
    CreatedAt,
}
