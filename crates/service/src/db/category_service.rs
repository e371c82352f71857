use models::{category, product};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set};
use tracing::info;

use crate::errors::ServiceError;

/// List all categories, each with its product rows. Always succeeds
/// (empty vec when no categories exist).
pub async fn list_categories(
    db: &DatabaseConnection,
) -> Result<Vec<(category::Model, Vec<product::Model>)>, ServiceError> {
    category::Entity::find()
        .find_with_related(product::Entity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Create a category. The name must be non-empty and unique; uniqueness is
/// pre-checked here for a descriptive error, the DB constraint backs it up.
pub async fn create_category(db: &DatabaseConnection, name: &str) -> Result<category::Model, ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation("name must be a non-empty string".into()));
    }
    let existing = category::Entity::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if existing.is_some() {
        return Err(ServiceError::Conflict(format!("category '{}' already exists", name)));
    }
    let am = category::ActiveModel { name: Set(name.to_string()), ..Default::default() };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id = created.id, "category created");
    Ok(created)
}

/// Get one category by id together with its products.
pub async fn get_category(
    db: &DatabaseConnection,
    id: i32,
) -> Result<(category::Model, Vec<product::Model>), ServiceError> {
    let cat = category::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("category"))?;
    let products = cat
        .find_related(product::Entity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok((cat, products))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    #[tokio::test]
    async fn category_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };

        let name = format!("svc_category_{}", Uuid::new_v4());
        let created = create_category(&db, &name).await?;
        assert_eq!(created.name, name);

        // New category starts with an empty product list
        let (fetched, products) = get_category(&db, created.id).await?;
        assert_eq!(fetched.id, created.id);
        assert!(products.is_empty());

        // Listing includes it exactly once
        let all = list_categories(&db).await?;
        let hits = all.iter().filter(|(c, _)| c.id == created.id).count();
        assert_eq!(hits, 1);

        // Duplicate name is a conflict
        let dup = create_category(&db, &name).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        // Whitespace-only name is a validation error
        let blank = create_category(&db, "   ").await;
        assert!(matches!(blank, Err(ServiceError::Validation(_))));

        category::Entity::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn category_get_missing_is_not_found() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };
        let missing = get_category(&db, i32::MAX).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
