//! Migration to create the requests table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Request::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Request::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Request::Chatcmpl).string())
                    .col(ColumnDef::new(Request::RequestId).string())
                    .col(ColumnDef::new(Request::MoonshotUid).string())
                    .col(ColumnDef::new(Request::RequestMethod).string().not_null())
                    .col(ColumnDef::new(Request::RequestPath).string().not_null())
                    .col(ColumnDef::new(Request::RequestQuery).string())
                    .col(ColumnDef::new(Request::RequestHeader).text())
                    .col(ColumnDef::new(Request::RequestBody).text())
                    .col(ColumnDef::new(Request::ResponseStatus).integer())
                    .col(ColumnDef::new(Request::ResponseHeader).text())
                    .col(ColumnDef::new(Request::ResponseBody).text())
                    .col(ColumnDef::new(Request::LatencyMs).big_integer())
                    .col(
                        ColumnDef::new(Request::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Exports look records up by either external identifier
        manager
            .create_index(
                Index::create()
                    .name("idx_requests_chatcmpl")
                    .table(Request::Table)
                    .col(Request::Chatcmpl)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_request_id")
                    .table(Request::Table)
                    .col(Request::RequestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_created_at")
                    .table(Request::Table)
                    .col(Request::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Request::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Request {
    #[sea_orm(iden = "requests")]
    Table,
    Id,
    Chatcmpl,
    RequestId,
    MoonshotUid,
    RequestMethod,
    RequestPath,
    RequestQuery,
    RequestHeader,
    RequestBody,
    ResponseStatus,
    ResponseHeader,
    ResponseBody,
    LatencyMs,
    CreatedAt,
}
