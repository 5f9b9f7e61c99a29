use devtech_api::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("devtech-api".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration().expect("Failed to read configuration");

    let app = Application::build(config)?;
    tracing::info!("Contact API is listening on port {}", app.get_port());
    app.run_until_stopped().await?;

    Ok(())
}
