//! Org endpoint: where a Salesforce org's REST API lives.

use crate::error::{Error, ErrorKind, Result};

/// Base URL of a Salesforce org.
///
/// Built from the org's My Domain subdomain
/// (`https://{subdomain}.my.salesforce.com`), or from an explicit base URL
/// for custom hosts and local test servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgEndpoint {
    base_url: String,
}

impl OrgEndpoint {
    /// Endpoint for a My Domain subdomain, e.g. `"acme"` or `"acme--dev.sandbox"`.
    pub fn new(subdomain: impl AsRef<str>) -> Result<Self> {
        let subdomain = subdomain.as_ref().trim();
        if subdomain.is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "org subdomain must not be empty".to_string(),
            )));
        }
        if !is_valid_subdomain(subdomain) {
            return Err(Error::new(ErrorKind::Config(format!(
                "invalid org subdomain: {subdomain}"
            ))));
        }

        Ok(Self {
            base_url: format!("https://{subdomain}.my.salesforce.com"),
        })
    }

    /// Endpoint rooted at an arbitrary `http(s)` base URL.
    pub fn from_base_url(base_url: impl AsRef<str>) -> Result<Self> {
        let parsed = url::Url::parse(base_url.as_ref())?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "expected an http(s) URL with a host, got {}",
                base_url.as_ref()
            ))));
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Load the subdomain from `SF_MY_DOMAIN` (or `SALESFORCE_MY_DOMAIN`).
    pub fn from_env() -> Result<Self> {
        let subdomain = std::env::var("SF_MY_DOMAIN")
            .or_else(|_| std::env::var("SALESFORCE_MY_DOMAIN"))
            .map_err(|_| {
                Error::new(ErrorKind::Config(
                    "environment variable SF_MY_DOMAIN is not set".to_string(),
                ))
            })?;
        Self::new(subdomain)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// OAuth 2.0 token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/services/oauth2/token", self.base_url)
    }

    /// Versioned REST API URL for a path, e.g. `rest_url("61.0", "query/")`.
    pub fn rest_url(&self, api_version: &str, path: &str) -> String {
        format!(
            "{}/services/data/v{}/{}",
            self.base_url,
            api_version,
            path.trim_start_matches('/')
        )
    }
}

fn is_valid_subdomain(subdomain: &str) -> bool {
    !subdomain.starts_with(['.', '-'])
        && !subdomain.ends_with(['.', '-'])
        && subdomain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomain_urls() {
        let endpoint = OrgEndpoint::new("acme").unwrap();
        assert_eq!(endpoint.base_url(), "https://acme.my.salesforce.com");
        assert_eq!(
            endpoint.token_url(),
            "https://acme.my.salesforce.com/services/oauth2/token"
        );
        assert_eq!(
            endpoint.rest_url("61.0", "sobjects/Account/"),
            "https://acme.my.salesforce.com/services/data/v61.0/sobjects/Account/"
        );
    }

    #[test]
    fn test_sandbox_subdomain() {
        let endpoint = OrgEndpoint::new("acme--dev.sandbox").unwrap();
        assert_eq!(
            endpoint.base_url(),
            "https://acme--dev.sandbox.my.salesforce.com"
        );
    }

    #[test]
    fn test_rejects_bad_subdomains() {
        for bad in ["", "   ", "acme/evil", "acme.", "-acme", "ac me", "acme?x=1"] {
            let err = OrgEndpoint::new(bad).unwrap_err();
            assert!(
                matches!(err.kind, ErrorKind::Config(_)),
                "expected config error for {bad:?}"
            );
        }
    }

    #[test]
    fn test_base_url_override() {
        let endpoint = OrgEndpoint::from_base_url("http://127.0.0.1:8080/").unwrap();
        assert_eq!(endpoint.base_url(), "http://127.0.0.1:8080");
        assert_eq!(
            endpoint.rest_url("61.0", "/query/"),
            "http://127.0.0.1:8080/services/data/v61.0/query/"
        );

        assert!(OrgEndpoint::from_base_url("ftp://example.com").is_err());
        assert!(OrgEndpoint::from_base_url("not a url").is_err());
    }
}
