// crates/shared-kernel/src/infrastructure/postgres/utils/postgres_migrations.rs

use sqlx::migrate::Migrator;
use sqlx::PgPool;
use std::path::Path;

/// Applique les migrations SQLx d'un dossier (`<version>_<description>.sql`).
/// Les versions déjà présentes dans `_sqlx_migrations` sont ignorées.
pub async fn run_postgres_migrations(pool: &PgPool, dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let dir = dir.as_ref();
    let migrator = Migrator::new(dir).await?;
    migrator.run(pool).await?;

    tracing::info!(path = %dir.display(), count = migrator.iter().count(), "Postgres migrations applied");
    Ok(())
}
