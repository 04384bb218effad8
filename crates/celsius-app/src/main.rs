use anyhow::Result;
use celsius_core::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize core
    celsius_core::init()?;

    // Missing credentials abort here, before any request is accepted.
    let (config, _validation) = Config::load_validated()?;

    let app = celsius_app::App::new(&config)?;

    tracing::info!("Celsius application started");
    app.run().await
}
