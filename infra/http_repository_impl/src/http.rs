use std::time::Duration;

use domain::errors::FetchError;
use domain::types::Clock;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

pub fn build_client(timeout: Duration) -> anyhow::Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

pub(crate) fn parse_url(url: &str) -> anyhow::Result<Url> {
    Ok(Url::parse(url)?)
}

/// GET that bypasses intermediary caches by appending the current time in millis as `t`.
pub(crate) fn cache_busted_get(client: &Client, url: &Url, clock: &dyn Clock) -> RequestBuilder {
    client
        .get(url.clone())
        .query(&[("t", clock.now().timestamp_millis().to_string())])
}

fn transport_error(url: &Url, error: &reqwest::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        message: error.to_string(),
    }
}

pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &Url,
) -> Result<T, FetchError> {
    let response = request
        .send()
        .await
        .map_err(|error| transport_error(url, &error))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|error| transport_error(url, &error))?;

    serde_json::from_slice(&body).map_err(|error| FetchError::Decode {
        url: url.to_string(),
        message: error.to_string(),
    })
}
