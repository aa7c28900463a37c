use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

use crate::domain::EmailAddress;
use crate::ticks::{parse_tick_export, Tick};

/// Stand-in climber returned in dev mode.
const DEV_CLIMBER_ID: u64 = 1111;
const DEV_CLIMBER_NAME: &str = "Dev";
/// Tick export served in dev mode instead of calling out.
const DEV_TICK_EXPORT: &str = include_str!("../fixtures/dev_ticks.csv");

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Climber {
    pub id: u64,
    pub name: String,
}

#[derive(thiserror::Error, Debug)]
pub enum MountainProjectError {
    #[error("failed to reach mountain project")]
    Request(#[source] reqwest::Error),

    #[error("mountain project replied with status {0}")]
    Status(StatusCode),

    #[error("mountain project sent a reply we could not read")]
    Reply(#[source] anyhow::Error),
}

#[derive(Debug)]
pub struct MountainProjectClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    dev_mode: bool,
}

impl MountainProjectClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Duration,
        dev_mode: bool,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            api_key,
            dev_mode,
        })
    }

    #[tracing::instrument(name = "fetch mountain project user", skip(self, email))]
    pub async fn get_user(
        &self,
        email: &EmailAddress,
    ) -> Result<Climber, MountainProjectError> {
        if self.dev_mode {
            return Ok(Climber {
                id: DEV_CLIMBER_ID,
                name: DEV_CLIMBER_NAME.to_string(),
            });
        }

        let url = format!("{}/data/get-user", self.base_url);
        let email: &str = email.as_ref();
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("email", email),
                ("key", self.api_key.expose_secret().as_str()),
            ])
            .send()
            .await
            .map_err(MountainProjectError::Request)?;

        let response = check_status(response)?;
        response
            .json::<Climber>()
            .await
            .context("failed to decode the get-user reply")
            .map_err(MountainProjectError::Reply)
    }

    #[tracing::instrument(
        name = "fetch mountain project tick export",
        skip(self, climber),
        fields(climber_id = climber.id)
    )]
    pub async fn tick_export(
        &self,
        climber: &Climber,
    ) -> Result<Vec<Tick>, MountainProjectError> {
        if self.dev_mode {
            return parse_tick_export(DEV_TICK_EXPORT)
                .context("failed to parse the dev tick export")
                .map_err(MountainProjectError::Reply);
        }

        let url = format!(
            "{}/user/{}/{}/tick-export",
            self.base_url,
            climber.id,
            urlencoding::encode(&climber.name)
        );
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(MountainProjectError::Request)?;

        let body = check_status(response)?
            .text()
            .await
            .context("failed to read the tick export body")
            .map_err(MountainProjectError::Reply)?;

        parse_tick_export(&body)
            .context("failed to parse the tick export")
            .map_err(MountainProjectError::Reply)
    }
}

fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, MountainProjectError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(MountainProjectError::Status(status))
    }
}
