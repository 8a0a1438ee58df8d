use crate::common::env::FromEnv;
use std::env;
use std::net::IpAddr;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::Level;

const DEFAULT_UPLOAD_DIR: &str = "uploads/images/teams";

pub struct AppSettings {
    pub app_component: String,
    pub level: Level,
    pub log_json: bool,
    pub app_host: IpAddr,
    pub app_port: u16,

    pub database_url: String,
    pub db_max_connections: u32,
    pub db_wait_timeout: Duration,

    pub upload_dir: PathBuf,
    pub logo_max_bytes: usize,
}

impl AppSettings {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv();

        let app_component = env::var("APP_COMPONENT")?;
        let level = Level::from_env_or("LOG_LEVEL", Level::INFO)?;
        let log_json = bool::from_env_or("LOG_JSON", false)?;
        let app_host = IpAddr::from_env("APP_HOST")?;
        let app_port = u16::from_env("APP_PORT")?;

        let database_url = env::var("DATABASE_URL")?;
        let db_max_connections = u32::from_env_or("DB_MAX_CONNECTIONS", 10)?;
        let db_wait_timeout_secs = u64::from_env_or("DB_WAIT_TIMEOUT_SECS", 5)?;
        let db_wait_timeout = Duration::from_secs(db_wait_timeout_secs);

        let upload_dir = PathBuf::from_env_or("UPLOAD_DIR", PathBuf::from(DEFAULT_UPLOAD_DIR))?;
        let logo_max_bytes = usize::from_env_or("LOGO_MAX_BYTES", 5 * 1024 * 1024)?;

        Ok(AppSettings {
            app_component,
            level,
            log_json,
            app_host,
            app_port,

            database_url,
            db_max_connections,
            db_wait_timeout,

            upload_dir,
            logo_max_bytes,
        })
    }

    pub fn get() -> &'static AppSettings {
        settings()
    }
}

pub fn settings() -> &'static AppSettings {
    static SETTINGS: LazyLock<AppSettings> =
        LazyLock::new(|| AppSettings::load_from_env().expect("Failed to load settings"));
    SETTINGS.deref()
}
