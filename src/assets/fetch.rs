//! Background imagery with silent fallback.
//!
//! Failures are modelled as [`FetchError`] internally and collapsed at the [`ImageSource`]
//! boundary: `fetch_by_url` yields `None`, `fetch_by_keyword` yields a solid fallback frame.
//! Nothing here retries.

use anyhow::Context as _;
use image::RgbaImage;

use crate::{
    assets::decode::{decode_image, fit_to_resolution, solid_fill},
    config::FetchConfig,
    foundation::{
        core::{Resolution, Rgba8},
        error::SlidecastResult,
    },
};

#[derive(thiserror::Error, Debug)]
pub(crate) enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("response body is not a decodable image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Provider of slide backgrounds. Implementations never fail outward.
pub trait ImageSource {
    /// Image at `url`, sized to the target resolution, or `None` on any failure.
    fn fetch_by_url(&self, url: &str) -> Option<RgbaImage>;

    /// Image matching `query`, sized to the target resolution, or the fallback image.
    fn fetch_by_keyword(&self, query: &str) -> RgbaImage;
}

/// Keep ASCII alphanumerics, whitespace and hyphens, then join the words with `separator`.
///
/// An empty result becomes `default_query`.
pub fn sanitize_query(query: &str, separator: &str, default_query: &str) -> String {
    let kept: String = query
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    let words: Vec<&str> = kept.split_whitespace().collect();
    if words.is_empty() {
        default_query.to_string()
    } else {
        words.join(separator)
    }
}

/// Blocking HTTP source with a fixed per-request timeout.
pub struct HttpImageSource {
    client: reqwest::blocking::Client,
    cfg: FetchConfig,
    resolution: Resolution,
}

impl HttpImageSource {
    pub fn new(cfg: &FetchConfig, resolution: Resolution) -> SlidecastResult<Self> {
        cfg.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(cfg.timeout())
            .user_agent(cfg.user_agent.as_str())
            .build()
            .context("build http client for image fetching")?;
        Ok(Self {
            client,
            cfg: cfg.clone(),
            resolution,
        })
    }

    fn get_image(&self, url: &str) -> Result<RgbaImage, FetchError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let bytes = resp.bytes()?;
        let img = decode_image(&bytes)?;
        Ok(fit_to_resolution(&img, self.resolution))
    }

    fn fallback(&self) -> RgbaImage {
        solid_fill(self.resolution, self.cfg.fallback_bg)
    }
}

impl ImageSource for HttpImageSource {
    fn fetch_by_url(&self, url: &str) -> Option<RgbaImage> {
        match self.get_image(url) {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::warn!(%url, error = %e, "article image unavailable");
                None
            }
        }
    }

    fn fetch_by_keyword(&self, query: &str) -> RgbaImage {
        let q = sanitize_query(query, &self.cfg.query_separator, &self.cfg.default_query);
        let url = self.cfg.keyword_url(self.resolution, &q);
        match self.get_image(&url) {
            Ok(img) => img,
            Err(e) => {
                tracing::warn!(%url, error = %e, "keyword image unavailable, using fallback");
                self.fallback()
            }
        }
    }
}

/// Never touches the network; every request resolves to the fallback colour.
#[derive(Clone, Debug)]
pub struct OfflineImageSource {
    resolution: Resolution,
    fallback: Rgba8,
}

impl OfflineImageSource {
    pub fn new(resolution: Resolution, fallback: Rgba8) -> Self {
        Self {
            resolution,
            fallback,
        }
    }
}

impl ImageSource for OfflineImageSource {
    fn fetch_by_url(&self, _url: &str) -> Option<RgbaImage> {
        None
    }

    fn fetch_by_keyword(&self, _query: &str) -> RgbaImage {
        solid_fill(self.resolution, self.fallback)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
