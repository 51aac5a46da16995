//! Create category_products join table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_categories::Categories;
use super::m20250301_000002_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CategoryProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CategoryProducts::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CategoryProducts::ProductId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CategoryProducts::CategoryId)
                            .col(CategoryProducts::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_products_category")
                            .from(CategoryProducts::Table, CategoryProducts::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_products_product")
                            .from(CategoryProducts::Table, CategoryProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookups (product -> categories)
        manager
            .create_index(
                Index::create()
                    .name("idx_category_products_product")
                    .table(CategoryProducts::Table)
                    .col(CategoryProducts::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CategoryProducts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CategoryProducts {
    Table,
    CategoryId,
    ProductId,
}
