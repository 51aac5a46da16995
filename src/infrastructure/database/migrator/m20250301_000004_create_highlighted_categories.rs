//! Create highlighted_categories table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HighlightedCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HighlightedCategories::CategoryId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(HighlightedCategories::Position)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_highlighted_categories_category")
                            .from(
                                HighlightedCategories::Table,
                                HighlightedCategories::CategoryId,
                            )
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HighlightedCategories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HighlightedCategories {
    Table,
    CategoryId,
    Position,
}
