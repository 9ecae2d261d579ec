use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Members::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Members::Name).string().not_null())
                    .col(
                        ColumnDef::new(Members::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Members::Phone)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Members::Roll)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Members::Skills).json().not_null())
                    .col(ColumnDef::new(Members::Linkedin).string())
                    .col(ColumnDef::new(Members::Github).string())
                    .col(ColumnDef::new(Members::About).string())
                    .col(ColumnDef::new(Members::OtpHash).string())
                    .col(ColumnDef::new(Members::OtpExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Members::OtpRequestCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Members::OtpWindowStartedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Members::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Members::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Members::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Members {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Roll,
    Skills,
    Linkedin,
    Github,
    About,
    OtpHash,
    OtpExpiresAt,
    OtpRequestCount,
    OtpWindowStartedAt,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}
