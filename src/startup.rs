use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use crate::configuration::{Environment, MailSettings, RelayMode, Settings, get_environment};
use crate::domain::ContactEmail;
use crate::mail::{MailRelay, SandboxMailRelay, SmtpMailRelay};
use crate::routes::{health_check, json_error_handler, not_found, submit_contact};

pub struct Application {
    port: u16,
    server: Server,
}

/// Where owner notifications are delivered; resolved once from configuration.
#[derive(Clone)]
pub struct OwnerAddress(pub ContactEmail);

impl Application {
    pub fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let environment = get_environment();

        let server = match config.mail.relay_mode() {
            RelayMode::Configured(smtp) => {
                let sender = config.mail.sender().map_err(anyhow::Error::msg)?;
                let relay = SmtpMailRelay::new(
                    &smtp,
                    &config.mail.sender_name,
                    &sender,
                    config.mail.timeout(),
                )?;
                run(listener, relay, &config.mail, environment)?
            }
            RelayMode::SandboxFallback => {
                tracing::warn!(
                    "No SMTP credentials configured, outgoing mail goes to the sandbox mailbox. \
                    Set EMAIL_HOST, EMAIL_USER and EMAIL_PASS to use a real relay."
                );
                run(listener, SandboxMailRelay::new(), &config.mail, environment)?
            }
        };

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run<M: MailRelay>(
    listener: TcpListener,
    relay: M,
    mail: &MailSettings,
    environment: Environment,
) -> Result<Server, anyhow::Error> {
    let owner = web::Data::new(OwnerAddress(mail.owner().map_err(anyhow::Error::msg)?));
    let relay = web::Data::new(relay);
    let environment = web::Data::new(environment);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(
                web::JsonConfig::default()
                    .limit(10 * 1024)
                    .error_handler(json_error_handler),
            )
            .route("/api/health", web::get().to(health_check))
            .route("/api/contact", web::post().to(submit_contact::<M>))
            .default_service(web::route().to(not_found))
            .app_data(relay.clone())
            .app_data(owner.clone())
            .app_data(environment.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
