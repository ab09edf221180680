use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::constants::MY_USER_AGENT;
use crate::types::{Error, Result};
use crate::util;
use crate::wrapper::request_data::SessionData;
use crate::wrapper::StudentVue;

/// A builder for the [`StudentVue`] client. This should be used when the
/// defaults (a fresh cookie-jar client, the stock user agent, a 30 second
/// timeout) need to be overridden.
///
/// # Example
/// ```rust,no_run
/// use std::time::Duration;
/// use studentvue::wrapper::StudentVue;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> studentvue::types::Result<()> {
/// let client = StudentVue::builder()
///     .with_district_url("https://portal.sfusd.edu")
///     .with_timeout(Duration::from_secs(10))
///     .login("username", "password")
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct StudentVueBuilder {
    district_url: Option<String>,
    client: Option<Client>,
    user_agent: String,
    timeout: Duration,
}

impl StudentVueBuilder {
    /// Constructs a builder with the default user agent and timeout. You
    /// are responsible for providing the district URL.
    ///
    /// # Returns
    /// A `StudentVueBuilder`.
    pub fn new() -> Self {
        Self {
            district_url: None,
            client: None,
            user_agent: MY_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the district portal URL. A bare host (`portal.sfusd.edu`) or a
    /// full URL (`https://portal.sfusd.edu/`) are both accepted.
    ///
    /// # Parameters
    /// - `url`: The district URL.
    ///
    /// # Returns
    /// The builder.
    pub fn with_district_url(mut self, url: impl Into<String>) -> Self {
        self.district_url = Some(url.into());
        self
    }

    /// Sets the client to the specified client. The client must have its
    /// cookie store enabled, since that jar *is* the portal session.
    ///
    /// # Parameters
    /// - `client`: The client to use.
    ///
    /// # Returns
    /// The builder.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the user agent to the specified user agent.
    ///
    /// # Parameters
    /// - `user_agent`: The user agent to use.
    ///
    /// # Returns
    /// The builder.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the per-request timeout.
    ///
    /// # Parameters
    /// - `timeout`: The timeout to use.
    ///
    /// # Returns
    /// The builder.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Logs into the portal with the given credentials and returns the
    /// ready client. The district URL must have been provided.
    ///
    /// # Parameters
    /// - `username`: The portal account's username.
    /// - `password`: The portal account's password.
    ///
    /// # Returns
    /// The logged-in [`StudentVue`] client, or an error — notably
    /// [`Error::InvalidCredentials`] when the portal rejects the login.
    pub async fn login(self, username: &str, password: &str) -> Result<StudentVue> {
        let district_url = self.district_url.ok_or(Error::InvalidInput(
            "district_url",
            "a district portal URL is required",
        ))?;
        let host = util::normalize_district_host(&district_url)?;
        let base = Url::parse(&format!("https://{host}/"))?;

        let client = match self.client {
            Some(client) => client,
            None => Client::builder().cookie_store(true).build()?,
        };

        let data = SessionData {
            client,
            base,
            user_agent: self.user_agent,
            timeout: self.timeout,
        };

        StudentVue::login_with(data, username, password).await
    }
}

impl Default for StudentVueBuilder {
    fn default() -> Self {
        Self::new()
    }
}
