//! Client settings read from the environment.

use std::time::Duration;

use mockable::Env;
use tracing::warn;
use url::Url;

use crate::error::ClientError;

/// Environment variable naming the API base URL.
pub const API_URL_ENV: &str = "STUDENT_RECORDS_API_URL";
/// Environment variable naming the request timeout in seconds.
pub const API_TIMEOUT_ENV: &str = "STUDENT_RECORDS_API_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how the client talks to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: Url,
    timeout: Duration,
}

impl ClientConfig {
    /// Configuration for an explicit base URL with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when `api_url` is not an absolute URL.
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Read settings through `env`, falling back to defaults.
    ///
    /// An unparseable timeout is logged and replaced by the default; an
    /// invalid URL is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the URL is invalid.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ClientError> {
        let api_url = env
            .string(API_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let timeout = match env.string(API_TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "invalid {API_TIMEOUT_ENV}; using default");
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Ok(Self::new(&api_url)?.with_timeout(timeout))
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL, always ending in `/`.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Parse a base URL and ensure a trailing slash so joins append segments.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|err| ClientError::Config(format!("invalid API URL `{trimmed}`: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Config(format!(
            "API URL `{trimmed}` cannot be used as a base"
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use mockable::MockEnv;
    use rstest::rstest;

    use super::*;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_env(&mock_env(&[]));
        assert_eq!(
            config.as_ref().map(|config| config.api_url().as_str()),
            Ok("http://localhost:3000/api/")
        );
        assert_eq!(
            config.map(|config| config.timeout()),
            Ok(Duration::from_secs(30))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let env = mock_env(&[
            (API_URL_ENV, "https://records.example.com/v2/"),
            (API_TIMEOUT_ENV, "5"),
        ]);
        let config = ClientConfig::from_env(&env);
        assert_eq!(
            config.as_ref().map(|config| config.api_url().as_str()),
            Ok("https://records.example.com/v2/")
        );
        assert_eq!(
            config.map(|config| config.timeout()),
            Ok(Duration::from_secs(5))
        );
    }

    #[rstest]
    #[case("0")]
    #[case("soon")]
    fn bad_timeouts_fall_back_to_default(#[case] timeout: &str) {
        let env = mock_env(&[(API_TIMEOUT_ENV, timeout)]);
        assert_eq!(
            ClientConfig::from_env(&env).map(|config| config.timeout()),
            Ok(Duration::from_secs(30))
        );
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:someone@example.com")]
    fn invalid_urls_are_rejected(#[case] url: &str) {
        assert!(matches!(
            ClientConfig::new(url),
            Err(ClientError::Config(_))
        ));
    }
}
