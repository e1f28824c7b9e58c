//! Shared HTTP plumbing for remote sources and the remote export service.

use reqwest::Client;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("featex/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for every remote call.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Append path segments to a base URL, keeping any path the base already has.
///
/// Segments containing `/` are split, so dataset ids like
/// `FAO/GAUL/2015/level2` become one segment per part.
pub fn join_url(base: &str, segments: &[&str]) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
        path.pop_if_empty();
        for segment in segments {
            path.extend(segment.split('/').filter(|s| !s.is_empty()));
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_keeps_base_path() {
        let url = join_url("https://tables.example.com/api/", &["v1", "exports"]).unwrap();
        assert_eq!(url.as_str(), "https://tables.example.com/api/v1/exports");
    }

    #[test]
    fn test_join_splits_dataset_ids() {
        let url = join_url(
            "http://localhost:8080",
            &["v1", "collections", "FAO/GAUL/2015/level2"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v1/collections/FAO/GAUL/2015/level2"
        );
    }

    #[test]
    fn test_join_rejects_opaque_urls() {
        assert!(join_url("mailto:someone@example.com", &["v1"]).is_err());
    }
}
