//! Core data types for identification requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of images accepted per identification request.
pub const MAX_IMAGES: usize = 5;

/// Maximum number of candidates the upstream will return per request.
pub const MAX_RESULTS: u32 = 25;

/// Which plant part appears in an image, positionally paired with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Organ {
    Leaf,
    Flower,
    Fruit,
    Bark,
    Habit,
    Auto,
    Other,
}

impl Organ {
    /// Wire name of the organ tag, as sent in the multipart body.
    pub fn as_str(&self) -> &'static str {
        match self {
            Organ::Leaf => "leaf",
            Organ::Flower => "flower",
            Organ::Fruit => "fruit",
            Organ::Bark => "bark",
            Organ::Habit => "habit",
            Organ::Auto => "auto",
            Organ::Other => "other",
        }
    }
}

impl std::fmt::Display for Organ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Organ {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leaf" => Ok(Organ::Leaf),
            "flower" => Ok(Organ::Flower),
            "fruit" => Ok(Organ::Fruit),
            "bark" => Ok(Organ::Bark),
            "habit" => Ok(Organ::Habit),
            "auto" => Ok(Organ::Auto),
            "other" => Ok(Organ::Other),
            other => Err(Error::InvalidRequest(format!(
                "unknown organ tag \"{other}\" (expected leaf, flower, fruit, bark, habit, auto, or other)"
            ))),
        }
    }
}

/// An identification request: image URLs with index-aligned organ tags.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentificationRequest {
    /// Image URLs, 1..=5. Order matters: image N pairs with organ N.
    pub images: Vec<String>,
    /// Organ tags, parallel to `images`.
    pub organs: Vec<Organ>,
    /// Flora database selector, e.g. "all" or "k-world-flora".
    pub project: String,
    /// Response language code.
    pub lang: String,
    /// Candidate count to request, 1..=25.
    pub nb_results: u32,
}

impl IdentificationRequest {
    pub fn new(images: Vec<String>, organs: Vec<Organ>) -> Self {
        Self {
            images,
            organs,
            project: default_project(),
            lang: default_lang(),
            nb_results: default_nb_results(),
        }
    }

    /// Check the shape invariants. Runs before any network I/O.
    pub fn validate(&self) -> Result<(), Error> {
        if self.images.is_empty() {
            return Err(Error::InvalidRequest(
                "at least one image is required".to_string(),
            ));
        }
        if self.images.len() != self.organs.len() {
            return Err(Error::InvalidRequest(format!(
                "image and organ counts must match ({} images, {} organs)",
                self.images.len(),
                self.organs.len()
            )));
        }
        if self.images.len() > MAX_IMAGES {
            return Err(Error::InvalidRequest(format!(
                "maximum {MAX_IMAGES} images per request, got {}",
                self.images.len()
            )));
        }
        Ok(())
    }
}

pub fn default_project() -> String {
    "all".to_string()
}

pub fn default_lang() -> String {
    "en".to_string()
}

pub fn default_nb_results() -> u32 {
    5
}

/// The upstream response to an identification call, deserialized verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResult {
    #[serde(default)]
    pub best_match: Option<String>,
    #[serde(default)]
    pub results: Vec<Candidate>,
    #[serde(default)]
    pub remaining_identification_requests: Option<i64>,
    #[serde(default)]
    pub version: Option<String>,
}

/// One ranked species match. Order within `results` is the upstream ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub score: f64,
    pub species: Species,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gbif: Option<RegistryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub powo: Option<RegistryRef>,
}

/// Taxonomic metadata for a candidate species.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub scientific_name_without_author: String,
    #[serde(default)]
    pub scientific_name_authorship: String,
    pub genus: Taxon,
    pub family: Taxon,
    #[serde(default)]
    pub common_names: Vec<String>,
}

/// A named taxon (genus or family).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxon {
    pub scientific_name_without_author: String,
}

/// Reference into an external species registry (GBIF, POWO).
///
/// The id arrives as a string for some projects and a number for others,
/// so it is kept as a raw JSON value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryRef {
    pub id: Value,
}

impl RegistryRef {
    /// The id without JSON quoting, suitable for display.
    pub fn id_display(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Project id to display metadata, returned verbatim and never cached.
pub type ProjectDirectory = BTreeMap<String, Value>;

/// Errors that can occur when talking to the identification service.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client was constructed without a usable credential.
    #[error("PlantNet API key must not be empty")]
    MissingApiKey,

    /// The request failed shape validation before any network I/O.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An image URL could not be retrieved; the whole call aborts.
    #[error("failed to fetch image {url}: {reason}")]
    ImageFetch { url: String, reason: String },

    /// The upstream service answered with a non-success status.
    #[error("PlantNet API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type PlantNetResult<T> = Result<T, Error>;
