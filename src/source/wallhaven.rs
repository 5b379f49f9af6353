use std::time::Duration;

use anyhow::Context as _;
use image::DynamicImage;

use crate::foundation::error::{ReleaseError, ReleaseResult};

/// Wallhaven search API endpoint.
pub const WALLHAVEN_SEARCH_ENDPOINT: &str = "https://wallhaven.cc/api/v1/search";

const STAGE: &str = "fetch background";

/// Query configuration for the background search.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub query: String,
    /// Wallhaven category bitmask (general/anime/people).
    pub categories: String,
    /// Wallhaven purity bitmask (sfw/sketchy/nsfw).
    pub purity: String,
    pub sorting: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: "nature".to_string(),
            categories: "100".to_string(),
            purity: "100".to_string(),
            sorting: "random".to_string(),
        }
    }
}

/// Status and body of a completed HTTP GET.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP GET used by [`BackgroundSource`].
///
/// Implementations report transport failures as errors and return every completed
/// response, whatever its status.
pub trait Transport {
    fn get(&self, url: &str) -> anyhow::Result<HttpResponse>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> ReleaseResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ts-release/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> anyhow::Result<HttpResponse> {
        let resp = self.client.get(url).send()?;
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

#[derive(serde::Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(serde::Deserialize)]
struct SearchHit {
    #[serde(default)]
    path: String,
}

/// Searches Wallhaven for a background and downloads the first hit.
#[derive(Clone, Debug)]
pub struct BackgroundSource<T> {
    transport: T,
    endpoint: String,
    params: SearchParams,
}

impl<T: Transport> BackgroundSource<T> {
    pub fn new(transport: T, params: SearchParams) -> Self {
        Self {
            transport,
            endpoint: WALLHAVEN_SEARCH_ENDPOINT.to_string(),
            params,
        }
    }

    /// Point searches at a different API endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Fetch and decode one background matching `width` x `height`.
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub fn fetch(&self, width: i32, height: i32) -> ReleaseResult<DynamicImage> {
        if width <= 0 || height <= 0 {
            return Err(ReleaseError::fetch(format!(
                "{STAGE}: invalid target size {width}x{height}"
            )));
        }

        let image_url = self.fetch_image_url(width, height)?;
        tracing::debug!(%image_url, "search returned image");
        self.download_and_decode(&image_url)
    }

    /// Full search URL for `width` x `height`.
    pub fn search_url(&self, width: i32, height: i32) -> ReleaseResult<String> {
        let resolution = format!("{width}x{height}");
        let url = reqwest::Url::parse_with_params(
            &self.endpoint,
            [
                ("categories", self.params.categories.as_str()),
                ("purity", self.params.purity.as_str()),
                ("q", self.params.query.as_str()),
                ("resolutions", resolution.as_str()),
                ("sorting", self.params.sorting.as_str()),
            ],
        )
        .map_err(|e| ReleaseError::fetch(format!("{STAGE}: invalid search endpoint: {e}")))?;
        Ok(url.into())
    }

    fn fetch_image_url(&self, width: i32, height: i32) -> ReleaseResult<String> {
        let url = self.search_url(width, height)?;
        let resp = self
            .transport
            .get(&url)
            .map_err(|e| ReleaseError::fetch(format!("{STAGE}: search request failed: {e:#}")))?;
        if !resp.is_success() {
            return Err(ReleaseError::fetch(format!(
                "{STAGE}: search request returned http {}",
                resp.status
            )));
        }

        let payload: SearchResponse = serde_json::from_slice(&resp.body)
            .map_err(|e| ReleaseError::fetch(format!("{STAGE}: decode search failed: {e}")))?;

        payload
            .data
            .into_iter()
            .next()
            .map(|hit| hit.path)
            .filter(|path| !path.is_empty())
            .ok_or_else(|| {
                ReleaseError::fetch(format!("{STAGE}: no usable image for {width}x{height}"))
            })
    }

    fn download_and_decode(&self, url: &str) -> ReleaseResult<DynamicImage> {
        let resp = self
            .transport
            .get(url)
            .map_err(|e| ReleaseError::fetch(format!("{STAGE}: image request failed: {e:#}")))?;
        if !resp.is_success() {
            return Err(ReleaseError::fetch(format!(
                "{STAGE}: image request returned http {}",
                resp.status
            )));
        }

        image::load_from_memory(&resp.body)
            .map_err(|e| ReleaseError::fetch(format!("{STAGE}: decode failed: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/wallhaven.rs"]
mod tests;
