use reqwest::blocking::Client;

use crate::config::ApiConfig;
use crate::FetchError;

/// Blocking GETs returning the body of a successful response.
pub trait Transport {
    /// Content API request, authenticated with the configured token.
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Public asset such as an icon. Never carries credentials, since the URL
    /// may point at another host.
    fn get_asset(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct HttpTransport {
    client: Client,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| FetchError::Http {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            token: config.token.clone(),
        })
    }
}

impl HttpTransport {
    fn send(&self, url: &str, token: Option<&str>) -> Result<Vec<u8>, FetchError> {
        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let http_error = |source: reqwest::Error| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = request.send().map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().map_err(http_error)?.to_vec())
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.send(url, self.token.as_deref())
    }

    fn get_asset(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.send(url, None)
    }
}
