use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chapters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Chapters::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Chapters::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Chapters::Title).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Chapters::Order)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Chapters::Order).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Chapters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Chapters::Table, Chapters::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Chapters::Table)
                    .col(Chapters::CourseId)
                    .name("idx_chapters_course_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chapters::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Chapters {
    Table,
    Id,
    CourseId,
    Title,
    Order,
    CreatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
