use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const EMBEDDED_FIGHTERS: &str = include_str!("../data/fighters.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub name: String,
    #[serde(default)]
    pub nickname: String,
    pub division: String,
    // 1 is the champion, N is the (N-1)th ranked contender.
    pub rating: u32,
    #[serde(default)]
    pub record: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn toggled(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

pub fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Male",
        Gender::Female => "Female",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightClass {
    pub name: &'static str,
    pub image_ref: &'static str,
    pub gender: Gender,
}

const fn wc(name: &'static str, image_ref: &'static str, gender: Gender) -> WeightClass {
    WeightClass {
        name,
        image_ref,
        gender,
    }
}

static WEIGHT_CLASSES: [WeightClass; 12] = [
    wc("Flyweight", "/images/flyweight-image.jpg", Gender::Male),
    wc("Bantamweight", "/images/bantamweight-image.jpg", Gender::Male),
    wc("Featherweight", "/images/featherweight-image.jpg", Gender::Male),
    wc("Lightweight", "/images/lightweight-image.jpg", Gender::Male),
    wc("Welterweight", "/images/welterweight-image.jpg", Gender::Male),
    wc("Middleweight", "/images/middleweight-image.jpg", Gender::Male),
    wc(
        "Light Heavyweight",
        "/images/lightheavyweight-image.jpg",
        Gender::Male,
    ),
    wc("Heavyweight", "/images/heavyweight-image.jpg", Gender::Male),
    wc(
        "Strawweight (Women)",
        "/images/woman-strawweight-image.jpg",
        Gender::Female,
    ),
    wc(
        "Flyweight (Women)",
        "/images/woman-flyweight-image.jpg",
        Gender::Female,
    ),
    wc(
        "Bantamweight (Women)",
        "/images/woman-bantamweight-image.jpg",
        Gender::Female,
    ),
    wc(
        "Featherweight (Women)",
        "/images/woman-featherweight-image.jpg",
        Gender::Female,
    ),
];

pub fn weight_classes() -> &'static [WeightClass] {
    &WEIGHT_CLASSES
}

pub fn parse_fighters_json(raw: &str) -> Result<Vec<Fighter>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid fighter catalog json")
}

pub fn embedded_catalog() -> Result<Vec<Fighter>> {
    parse_fighters_json(EMBEDDED_FIGHTERS).context("embedded fighter catalog")
}

pub fn load_catalog_file(path: &Path) -> Result<Vec<Fighter>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_fighters_json(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
