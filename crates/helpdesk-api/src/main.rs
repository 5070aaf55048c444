use helpdesk_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    helpdesk_api::telemetry::init_telemetry();

    let config = Config::from_env()?;

    let (_state, router) = helpdesk_api::setup::initialize_app(config.clone()).await?;

    helpdesk_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
