use std::time::Duration;

use rancher_core::prelude::*;

use crate::FetchError;

/// Where the catalog lives and how to ask for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let base_url = settings
            .api_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or(FetchError::MissingBaseUrl)?;

        Ok(Self {
            base_url: base_url.to_string(),
            token: settings.api_token.clone(),
            timeout: Duration::from_millis(settings.request_timeout_ms),
        })
    }

    /// Collection listing for `category` with the icon relation expanded.
    pub fn endpoint(&self, category: Category) -> String {
        format!(
            "{}/api/{}?populate=Icon",
            self.base_url,
            category.collection()
        )
    }

    /// Upload paths come back relative to the API host.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}
