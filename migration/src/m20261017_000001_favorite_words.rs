use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 favorite_words 表
        manager
            .create_table(
                Table::create()
                    .table(FavoriteWord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoriteWord::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FavoriteWord::Word).text().not_null())
                    .col(
                        ColumnDef::new(FavoriteWord::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteWord::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建时间索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_favorite_words_created_at")
                    .table(FavoriteWord::Table)
                    .col(FavoriteWord::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_favorite_words_created_at")
                    .table(FavoriteWord::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FavoriteWord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FavoriteWord {
    #[sea_orm(iden = "favorite_words")]
    Table,
    Id,
    Word,
    CreatedAt,
    UpdatedAt,
}
