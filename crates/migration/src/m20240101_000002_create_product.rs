//! Create `product` table with a nullable FK to `category`.
//!
//! A product may exist without a category; a dangling reference is rejected
//! by the constraint, not by application code.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(string_len(Product::Name, 128).not_null())
                    // Explicitly define nullable description to avoid conflicting NULL/NOT NULL
                    .col(ColumnDef::new(Product::Description).text().null())
                    .col(double(Product::Price).not_null())
                    .col(integer(Product::Quantity).not_null())
                    .col(ColumnDef::new(Product::CategoryId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_category")
                            .from(Product::Table, Product::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product { Table, Id, Name, Description, Price, Quantity, CategoryId }

#[derive(DeriveIden)]
enum Category { Table, Id }
