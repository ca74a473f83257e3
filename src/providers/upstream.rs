use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use url::Url;

use super::ProviderKind;
use super::policy::{ErrorEnvelope, upstream_error_message};
use crate::error::UpstreamError;
use crate::utils::logging::with_pretty_json_debug;

pub(crate) const RELAY_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build a single-use HTTP client.
///
/// Each provider call gets its own client with pooling disabled, so nothing
/// outlives the call that created it.
pub(crate) fn build_client(
    proxy: Option<&Url>,
    connect_timeout: Duration,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(CONNECTION, HeaderValue::from_static("close"));

    let mut builder = reqwest::Client::builder()
        .user_agent(RELAY_USER_AGENT)
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(connect_timeout)
        .http1_only()
        .pool_max_idle_per_host(0)
        .pool_idle_timeout(Duration::from_secs(0));

    // Only the configured proxy applies; `HTTP(S)_PROXY` from the environment is ignored.
    builder = match proxy {
        Some(proxy_url) => builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?),
        None => builder.no_proxy(),
    };

    builder.default_headers(headers).build()
}

/// POST `body` as JSON and decode a 2xx response as `R`.
///
/// Non-2xx responses are decoded through the provider's error envelope `E`.
pub(crate) async fn post_json<T, R, E>(
    provider: ProviderKind,
    client: &reqwest::Client,
    url: Url,
    headers: HeaderMap,
    body: &T,
) -> Result<R, UpstreamError>
where
    T: Serialize,
    R: DeserializeOwned,
    E: ErrorEnvelope,
{
    with_pretty_json_debug(body, |pretty_body| {
        tracing::debug!(
            provider = %provider,
            url = %url,
            body = %pretty_body,
            "[{provider}] Outbound request body"
        );
    });

    let resp = client.post(url).headers(headers).json(body).send().await?;
    let status = resp.status();
    let bytes = resp.bytes().await?;

    if !status.is_success() {
        let message = upstream_error_message::<E>(&bytes);
        tracing::debug!(
            provider = %provider,
            %status,
            message = %message,
            "[{provider}] Upstream returned error status"
        );
        return Err(UpstreamError::Status { status, message });
    }

    Ok(serde_json::from_slice(&bytes)?)
}
