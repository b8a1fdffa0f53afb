//! Projector configuration.
//!
//! Every value has a default, so a TOML file only needs the keys it changes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

use crate::models::ViewState;

const DEFAULT_IMAGE_BASE: &str = "https://arquitecturaviva.com/assets/uploads/obras";
const DEFAULT_ARTICLE_BASE: &str = "https://arquitecturaviva.com/obras";
const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    pub view: ViewConfig,
    pub urls: UrlConfig,
    pub tiles: TileLayer,
    /// Firms whose markers are flagged as highlighted
    pub highlight_firms: Vec<String>,
}

/// Camera heuristic tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Camera used when there is nothing to frame (Madrid)
    pub fallback: ViewState,
    /// Checked in order; the first tier whose `max_span` exceeds the span wins
    pub zoom_tiers: Vec<ZoomTier>,
    /// Zoom when the span reaches past every tier
    pub widest_zoom: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTier {
    pub max_span: f64,
    pub zoom: u8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fallback: ViewState {
                center_latitude: 40.4168,
                center_longitude: -3.7038,
                zoom_level: 6,
            },
            zoom_tiers: vec![
                ZoomTier { max_span: 0.1, zoom: 10 },
                ZoomTier { max_span: 0.5, zoom: 8 },
                ZoomTier { max_span: 1.0, zoom: 7 },
                ZoomTier { max_span: 5.0, zoom: 6 },
            ],
            widest_zoom: 4,
        }
    }
}

/// Base URLs for popup links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    /// Thumbnails live at `{image_base}/{id}/av_thumb__{img}?h={hash}`
    pub image_base: Url,
    /// Articles live at `{article_base}/{slug}`
    pub article_base: Url,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            image_base: Url::parse(DEFAULT_IMAGE_BASE).expect("valid default image base"),
            article_base: Url::parse(DEFAULT_ARTICLE_BASE).expect("valid default article base"),
        }
    }
}

/// Raster tile source handed to the front-end map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

impl ProjectorConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ProjectorConfig =
            toml::from_str(content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Zoom tiers must be finite and strictly increasing, or the
    /// first-match rule would shadow later tiers.
    pub fn validate(&self) -> Result<()> {
        let tiers = &self.view.zoom_tiers;
        if let Some(bad) = tiers.iter().find(|t| !t.max_span.is_finite()) {
            anyhow::bail!("Zoom tier span must be finite, got {}", bad.max_span);
        }
        if tiers.windows(2).any(|w| w[0].max_span >= w[1].max_span) {
            anyhow::bail!("Zoom tiers must be listed by strictly increasing max_span");
        }
        Ok(())
    }
}
