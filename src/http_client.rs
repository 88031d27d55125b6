use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared client; the timeout of the first call wins.
pub fn http_client(timeout_secs: u64) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| build_client(timeout_secs))
}

pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("fight_picker/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build http client")
}
