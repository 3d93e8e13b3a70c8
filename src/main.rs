use anyhow::Context;
use log::info;
use nexa::{
    api::ChatClient,
    config::{get_config, initialize_config},
    logging::init_logging,
    ui::{event_channel, run_ui},
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    initialize_config().context("loading configuration")?;
    let config = get_config();
    let _logger = init_logging(&config).context("starting logger")?;
    info!("Starting Nexa against {}", config.endpoint);

    let client = ChatClient::from_config(&config).context("building HTTP client")?;
    let (tx, rx) = event_channel();
    let app = App::new(&config, client, tx.clone());

    run_ui(app, tx, rx).await.context("running terminal UI")?;
    info!("Nexa exited");
    Ok(())
}
