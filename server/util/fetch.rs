use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;

use ricescan::{Error, Result};

/// Upper bound on a downloaded image.
pub const MAX_IMAGE_BYTES: u64 = 20 * 1024 * 1024;

/// Parses `raw` and accepts only absolute http(s) URLs with a host.
pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(Error::InvalidUrl(format!("unsupported scheme '{}'", other))),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::InvalidUrl("missing host".to_owned()));
    }
    Ok(url)
}

/// Blocking HTTP client for the image download step.
pub struct ImageFetcher {
    client: Client,
    max_bytes: u64,
}

impl ImageFetcher {
    pub fn new(timeout: Duration, max_bytes: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ricescan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(ImageFetcher::with_client(client, max_bytes))
    }

    pub fn with_client(client: Client, max_bytes: u64) -> Self {
        ImageFetcher { client, max_bytes }
    }

    /// Downloads the body of `url`. Non-2xx statuses and bodies over the
    /// size cap are errors.
    pub fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Fetch(e.to_string()))?;

        if let Some(len) = response.content_length() {
            if len > self.max_bytes {
                return Err(self.too_large(len));
            }
        }

        let mut bytes = Vec::new();
        response
            .take(self.max_bytes + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| Error::Fetch(e.to_string()))?;
        if bytes.len() as u64 > self.max_bytes {
            return Err(self.too_large(bytes.len() as u64));
        }
        Ok(bytes)
    }

    fn too_large(&self, len: u64) -> Error {
        Error::Fetch(format!("image is {} bytes, limit is {}", len, self.max_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cap_is_twenty_mebibytes() {
        assert_eq!(MAX_IMAGE_BYTES, 20 * 1024 * 1024);
        let fetcher = ImageFetcher::new(Duration::from_secs(30), MAX_IMAGE_BYTES).unwrap();
        let err = fetcher.too_large(MAX_IMAGE_BYTES + 1);
        assert_eq!(err.to_string(), "image is 20971521 bytes, limit is 20971520");
    }

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("https://example.com/leaf.jpg").is_ok());
        assert!(validate_url("  http://10.0.0.2:8080/a.png ").is_ok());
    }

    #[test]
    fn rejects_non_urls_and_other_schemes() {
        for raw in ["", "leaf.jpg", "ftp://example.com/a.png", "file:///etc/passwd", "http://"] {
            assert!(
                matches!(validate_url(raw), Err(Error::InvalidUrl(_))),
                "accepted {:?}",
                raw
            );
        }
    }
}
