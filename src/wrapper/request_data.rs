use std::time::Duration;

use reqwest::header::USER_AGENT;
use reqwest::{Client, IntoUrl, RequestBuilder};
use url::Url;

use crate::types::Result;

pub(crate) enum ReqType<U: IntoUrl> {
    Post(U),
    Get(U),
}

/// Everything a logged-in session needs to make requests: the client that
/// owns the cookie jar, the district base URL, and the per-request header
/// and timeout settings.
pub(crate) struct SessionData {
    pub client: Client,
    /// The district base, e.g. `https://portal.sfusd.edu/`. Page paths are
    /// joined onto this.
    pub base: Url,
    pub user_agent: String,
    pub timeout: Duration,
}

impl SessionData {
    /// Joins a page path (possibly carrying a query string) onto the
    /// district base URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    /// Makes a request builder with the desired request type, applying the
    /// session's user agent and timeout.
    pub fn req<U>(&self, req_type: ReqType<U>) -> RequestBuilder
    where
        U: IntoUrl,
    {
        match req_type {
            ReqType::Post(u) => self.client.post(u),
            ReqType::Get(u) => self.client.get(u),
        }
        .header(USER_AGENT, self.user_agent.as_str())
        .timeout(self.timeout)
    }
}
