use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A sellable item, optionally belonging to one category. `category_id` is
/// a nullable FK; referential integrity lives in the database, not here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub category_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(crate::category::Entity)
                .from(Column::CategoryId)
                .to(crate::category::Column::Id)
                .into(),
        }
    }
}

impl Related<crate::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
