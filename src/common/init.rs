use crate::common::state::AppState;
use crate::settings::AppSettings;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, Pool};
use tracing::info;

pub fn initialize_logging(settings: &AppSettings) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(settings.level)
        .with_timer(tracing_subscriber::fmt::time())
        .with_level(true);
    if settings.log_json {
        subscriber.json().init();
    } else {
        subscriber.compact().init();
    }
}

pub async fn initialize_state(settings: &AppSettings) -> anyhow::Result<AppState> {
    let db = initialize_db(settings).await?;
    tokio::fs::create_dir_all(&settings.upload_dir).await?;
    Ok(AppState {
        db,
        upload_dir: settings.upload_dir.as_path().into(),
    })
}

pub fn initialize_db(settings: &AppSettings) -> impl Future<Output = sqlx::Result<Pool<MySql>>> {
    MySqlPoolOptions::new()
        .acquire_timeout(settings.db_wait_timeout)
        .max_connections(settings.db_max_connections)
        .connect(&settings.database_url)
}

pub async fn run_migrations(settings: &AppSettings) -> anyhow::Result<()> {
    let db = initialize_db(settings).await?;
    sqlx::migrate!("./migrations").run(&db).await?;
    info!("Database migrations applied");
    Ok(())
}
