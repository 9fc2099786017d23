//! Storefront account service entry point.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use storefront::domain::ports::CustomerAccount;
use storefront::inbound::http::health::HealthState;
use storefront::inbound::http::session_config::fingerprint::key_fingerprint;
use storefront::inbound::http::session_config::{BuildMode, SessionSettings};
use storefront::outbound::customer_account::CustomerAccountHttpClient;
use storefront::settings::StorefrontSettings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        StorefrontSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let session = SessionSettings::from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session key loaded"
    );

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let login_url = settings.login_url().map_err(std::io::Error::other)?;
    if login_url.is_none() {
        warn!("STOREFRONT_LOGIN_URL not set; /account/login will answer 503");
    }

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_login_url(login_url);
    if let Some(customer_account) = customer_account(&settings)? {
        config = config.with_customer_account(customer_account);
    } else {
        warn!("STOREFRONT_CUSTOMER_API_URL not set; serving fixture customer data");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "storefront account service listening");
    server.await
}

fn customer_account(
    settings: &StorefrontSettings,
) -> std::io::Result<Option<Arc<dyn CustomerAccount>>> {
    let Some(endpoint) = settings.customer_api_url().map_err(std::io::Error::other)? else {
        return Ok(None);
    };
    let timeout = settings.request_timeout().map_err(std::io::Error::other)?;
    let client = CustomerAccountHttpClient::new(endpoint, timeout, Arc::new(DefaultClock))
        .map_err(std::io::Error::other)?
        .with_user_agent(settings.user_agent());
    Ok(Some(Arc::new(client)))
}
