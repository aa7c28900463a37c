use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::guard::{FormGuard, GuardIds, LoadingIndicator};
use crate::mountain_project::MountainProjectClient;
use crate::routes::{data, health, index, not_found, redirect_to_index};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let mp_client = MountainProjectClient::new(
            config.mountain_project.base_url.clone(),
            config.mountain_project.api_key.clone(),
            config.mountain_project.timeout(),
            config.application.dev_mode,
        )?;

        let address = format!(
            "{}:{}",
            config.application.host, config.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(
            listener,
            mp_client,
            config.application.loading_indicator(),
            config.mountain_project.test_account,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Address submitted when the visitor uses the test-account button.
pub struct TestAccount(pub String);

pub fn run(
    listener: TcpListener,
    mp_client: MountainProjectClient,
    indicator: LoadingIndicator,
    test_account: String,
) -> Result<Server, std::io::Error> {
    let mp_client = web::Data::new(mp_client);
    let form_guard =
        web::Data::new(FormGuard::new(GuardIds::email_form(), indicator));
    let test_account = web::Data::new(TestAccount(test_account));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(index))
            .route("/", web::post().to(index))
            .route("/health", web::get().to(health))
            .route("/data", web::post().to(data))
            .route("/data", web::get().to(redirect_to_index))
            .default_service(web::route().to(not_found))
            .app_data(mp_client.clone())
            .app_data(form_guard.clone())
            .app_data(test_account.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
