//! Category entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category model - a named group of products
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Public identifier (UUID string)
    #[sea_orm(unique)]
    pub uuid: String,

    pub name: String,

    /// URL-safe form of `name`
    #[sea_orm(unique)]
    pub slug: String,

    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::category_product::Entity")]
    CategoryProduct,

    #[sea_orm(has_one = "super::highlighted_category::Entity")]
    Highlight,
}

impl Related<super::category_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryProduct.def()
    }
}

impl Related<super::highlighted_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Highlight.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::category_product::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::category_product::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
