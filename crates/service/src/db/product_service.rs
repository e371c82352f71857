use models::product;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::info;

use crate::errors::ServiceError;

fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("name must be a non-empty string".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ServiceError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ServiceError::Validation("price must be >= 0".into()));
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), ServiceError> {
    if quantity < 0 {
        return Err(ServiceError::Validation("quantity must be >= 0".into()));
    }
    Ok(())
}

/// List all products, unfiltered.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    product::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Create a product. `category_id` is not pre-checked: a dangling reference
/// fails at the storage layer with a constraint violation.
pub async fn create_product(
    db: &DatabaseConnection,
    name: &str,
    description: Option<String>,
    price: f64,
    quantity: i32,
    category_id: Option<i32>,
) -> Result<product::Model, ServiceError> {
    validate_name(name)?;
    validate_price(price)?;
    validate_quantity(quantity)?;
    let am = product::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description),
        price: Set(price),
        quantity: Set(quantity),
        category_id: Set(category_id),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id = created.id, "product created");
    Ok(created)
}

/// Get one product by id.
pub async fn get_product(db: &DatabaseConnection, id: i32) -> Result<product::Model, ServiceError> {
    product::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("product"))
}

/// Partial update: only supplied fields are overwritten. `category_id`
/// takes a nested Option so callers can also clear the reference.
pub async fn update_product(
    db: &DatabaseConnection,
    id: i32,
    name: Option<&str>,
    description: Option<String>,
    price: Option<f64>,
    quantity: Option<i32>,
    category_id: Option<Option<i32>>,
) -> Result<product::Model, ServiceError> {
    let mut am: product::ActiveModel = product::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("product"))?
        .into();
    if let Some(n) = name {
        validate_name(n)?;
        am.name = Set(n.to_string());
    }
    if let Some(d) = description {
        am.description = Set(Some(d));
    }
    if let Some(p) = price {
        validate_price(p)?;
        am.price = Set(p);
    }
    if let Some(q) = quantity {
        validate_quantity(q)?;
        am.quantity = Set(q);
    }
    if let Some(c) = category_id {
        am.category_id = Set(c);
    }
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Delete a product. NotFound when the id was never assigned.
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = product::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("product"));
    }
    info!(id, "product deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::category_service;
    use crate::test_support::get_db;
    use models::category;
    use uuid::Uuid;

    #[tokio::test]
    async fn product_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };

        let cat = category_service::create_category(&db, &format!("svc_prod_cat_{}", Uuid::new_v4())).await?;

        let created = create_product(&db, "Laptop", Some("16GB RAM".into()), 999.99, 10, Some(cat.id)).await?;
        assert_eq!(created.name, "Laptop");
        assert_eq!(created.category_id, Some(cat.id));

        // Shows up in the category's derived product list
        let (_, products) = category_service::get_category(&db, cat.id).await?;
        assert!(products.iter().any(|p| p.id == created.id));

        // Partial update: price only, everything else untouched
        let updated = update_product(&db, created.id, None, None, Some(899.5), None, None).await?;
        assert_eq!(updated.price, 899.5);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.quantity, created.quantity);
        assert_eq!(updated.category_id, created.category_id);
        assert_eq!(updated.description, created.description);

        // Clearing the category reference
        let cleared = update_product(&db, created.id, None, None, None, None, Some(None)).await?;
        assert_eq!(cleared.category_id, None);

        // Delete, then a second delete and a get both miss
        delete_product(&db, created.id).await?;
        assert!(matches!(delete_product(&db, created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(get_product(&db, created.id).await, Err(ServiceError::NotFound(_))));

        category::Entity::delete_by_id(cat.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn product_validation_rules() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };

        assert!(matches!(
            create_product(&db, "", None, 1.0, 1, None).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            create_product(&db, "Widget", None, -1.0, 1, None).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            create_product(&db, "Widget", None, 1.0, -1, None).await,
            Err(ServiceError::Validation(_))
        ));

        // Dangling category reference is not pre-checked and fails in the db
        let dangling = create_product(&db, "Ghost", None, 1.0, 1, Some(i32::MAX)).await;
        assert!(matches!(dangling, Err(ServiceError::Db(_))));
        Ok(())
    }

    #[tokio::test]
    async fn product_update_missing_is_not_found() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };
        let missing = update_product(&db, i32::MAX, Some("x"), None, None, None, None).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
