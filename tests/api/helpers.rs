use mpv::{
    configuration::get_config,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use wiremock::MockServer;

pub const TEST_ACCOUNT: &str = "test-climber@example.com";

pub struct TestApp {
    pub address: String,
    pub mp_server: MockServer,
    pub api_client: reqwest::Client,
}

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // Use of a sink allow for logs to be dumped by default when running tests.
    // If you do need them use:
    // # `TEST_LOG=1 cargo test health_check_works | bunyan`
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout,
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink,
        );
        init_subscriber(subscriber);
    }
});

impl TestApp {
    pub async fn get_index(&self, query: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/{}", &self.address, query))
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub async fn get_index_html(&self, query: &str) -> String {
        self.get_index(query).await.text().await.unwrap()
    }

    pub async fn post_data<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/data", &self.address))
            .form(body)
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub async fn get_data(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/data", &self.address))
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub async fn health(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/health", &self.address))
            .send()
            .await
            .expect("failed to execute request.")
    }
}

// spawn_app launches application in the background.
pub async fn spawn_app() -> TestApp {
    // the first time initialise is called the code in tracing is invoked otherwise we skip.
    Lazy::force(&TRACING);

    let mp_server = MockServer::start().await;

    let config = {
        let mut c = get_config().expect("failed to read configuration");
        c.application.port = 0;
        c.application.dev_mode = false;
        c.mountain_project.base_url = mp_server.uri();
        c.mountain_project.test_account = TEST_ACCOUNT.to_string();
        c.mountain_project.timeout_milliseconds = 500;
        c
    };

    let application = Application::build(config)
        .await
        .expect("failed to build application");
    let address = format!("http://127.0.0.1:{}", application.port());

    let _ = tokio::spawn(application.run_until_stopped());

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address,
        mp_server,
        api_client,
    }
}

pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}
