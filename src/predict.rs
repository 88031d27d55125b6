use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::http_client::http_client;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub fighter1: String,
    pub fighter2: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub winner: String,
    pub confidence: f64,
    pub loser: Option<String>,
}

impl PredictionResult {
    /// Confidence as a whole percent, rounded half away from zero.
    pub fn percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    winner: Option<String>,
    confidence: Option<f64>,
    #[serde(alias = "looser")]
    loser: Option<String>,
}

pub fn parse_prediction_json(raw: &str) -> Result<PredictionResult> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        bail!("empty prediction response");
    }
    let raw: RawPrediction = serde_json::from_str(trimmed).context("invalid prediction json")?;

    let winner = raw.winner.map(|w| w.trim().to_string()).unwrap_or_default();
    if winner.is_empty() {
        bail!("prediction response has no winner");
    }
    let Some(confidence) = raw.confidence else {
        bail!("prediction response has no confidence");
    };
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        bail!("prediction confidence out of range: {confidence}");
    }

    Ok(PredictionResult {
        winner,
        confidence,
        loser: raw.loser.filter(|l| !l.trim().is_empty()),
    })
}

pub fn request_prediction(cfg: &AppConfig, request: &PredictRequest) -> Result<PredictionResult> {
    let client = http_client(cfg.request_timeout_secs)?;
    post_prediction(client, &cfg.predict_url, request)
}

pub fn post_prediction(
    client: &Client,
    url: &str,
    request: &PredictRequest,
) -> Result<PredictionResult> {
    let resp = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .json(request)
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed to read prediction body")?;
    if !status.is_success() {
        bail!("predict endpoint returned {status}: {}", snippet(&body));
    }
    parse_prediction_json(&body)
}

fn snippet(body: &str) -> &str {
    const MAX: usize = 120;
    let body = body.trim();
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
