use crate::error::FetchError;

/// One GET per call; a non-success status is an error, never retried.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[cfg(feature = "download")]
pub use http::HttpFetcher;

#[cfg(feature = "download")]
mod http {
    use reqwest::{blocking::Client, redirect::Policy};

    use crate::{config::PipelineConfig, error::{ClientError, FetchError}};

    use super::Fetch;

    /// Blocking HTTP fetcher with a bounded timeout.
    pub struct HttpFetcher {
        client: Client,
    }

    impl HttpFetcher {
        pub fn new(config: &PipelineConfig) -> Result<Self, ClientError> {
            let client = Client::builder()
                .user_agent(config.user_agent.clone())
                .redirect(Policy::limited(10))
                .timeout(config.timeout())
                .build()
                .map_err(|e| ClientError(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl Fetch for HttpFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            let transport = |e: reqwest::Error| FetchError::Transport { url: url.to_string(), message: e.to_string() };

            let resp = self.client.get(url).send().map_err(transport)?;
            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
            }
            Ok(resp.bytes().map_err(transport)?.to_vec())
        }
    }
}
