use lms_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

pub async fn init_pool_and_migrate(
    options: impl Into<ConnectOptions>,
) -> anyhow::Result<DatabaseConnection> {
    let options = options.into();
    let url = options.get_url().to_string();

    let db = Database::connect(options).await?;

    Migrator::up(&db, None).await?;
    info!(backend = ?db.get_database_backend(), url = %redact_url(&url), "database ready");

    Ok(db)
}

/// Drops the password component of a connection URL before logging it.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.split_once('@') else {
        return url.to_string();
    };

    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::redact_url;

    #[test]
    fn password_is_redacted() {
        assert_eq!(
            redact_url("postgres://lms:secret@db:5432/lms"),
            "postgres://lms:***@db:5432/lms"
        );
    }

    #[test]
    fn urls_without_credentials_are_unchanged() {
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            redact_url("sqlite://lms.sqlite?mode=rwc"),
            "sqlite://lms.sqlite?mode=rwc"
        );
    }
}
