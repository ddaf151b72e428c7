use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lessons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lessons::ChapterId).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::Title).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Lessons::Content)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Lessons::VideoUrl).string())
                    .col(
                        ColumnDef::new(Lessons::Order)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Lessons::Order).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Lessons::IsFreePreview)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Lessons::Table, Lessons::ChapterId)
                            .to(Chapters::Table, Chapters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Lessons::Table)
                    .col(Lessons::ChapterId)
                    .name("idx_lessons_chapter_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Lessons {
    Table,
    Id,
    ChapterId,
    Title,
    Content,
    VideoUrl,
    Order,
    IsFreePreview,
}

#[derive(Iden)]
enum Chapters {
    Table,
    Id,
}
