use anyhow::bail;
use tournament_service::api;
use tournament_service::common::init;
use tournament_service::settings::AppSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::get();
    init::initialize_logging(settings);
    match settings.app_component.as_str() {
        "api" => api::serve(settings).await,
        "migrate" => init::run_migrations(settings).await,
        component => bail!("Unknown app component: {component}"),
    }
}
