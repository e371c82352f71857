#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_db_config() -> configs::DatabaseConfig {
    let mut cfg = configs::load_default().map(|c| c.database).unwrap_or_default();
    cfg.normalize_from_env();
    cfg
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection. Connection
    // failures are reported but not fatal so tests can skip gracefully.
    MIGRATED
        .get_or_init(|| async {
            let cfg = test_db_config();
            match connect_with_config(&cfg).await {
                Ok(db) => {
                    if let Err(e) = migration::Migrator::up(&db, None).await {
                        eprintln!("migrate up failed: {}", e);
                    }
                }
                Err(e) => eprintln!("cannot connect to db for migration: {}", e),
            }
        })
        .await;

    // Return a fresh connection for the current test's runtime
    let mut cfg = test_db_config();
    cfg.max_connections = cfg.max_connections.max(20);
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.acquire_timeout_secs = 10;
    let db = connect_with_config(&cfg).await?;
    Ok(db)
}
