//! Request stage: URL resolution, default headers, credential injection.

use janitor_domain::{ApiRequest, Credential};
use thiserror::Error;
use url::Url;

use super::config::{AUTH_HEADER, ClientConfig};
use crate::ports::PreparedRequest;

/// Failures while preparing a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    /// The resolved URL is not valid.
    #[error("invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// URL that failed to parse.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The query parameters could not be encoded.
    #[error("invalid query parameters: {0}")]
    Query(String),
}

/// Builds the request handed to the transport.
///
/// The auth header is only present when a non-empty credential is given.
///
/// # Errors
///
/// Returns an error if the URL or query string cannot be built.
pub fn prepare_request(
    request: &ApiRequest,
    credential: Option<&Credential>,
    config: &ClientConfig,
) -> Result<PreparedRequest, PrepareError> {
    let url = resolve_url(config, &request.path)?;
    let url = with_query(url, &request.query)?;

    let mut headers = config.default_headers.clone();
    if let Some(credential) = credential.filter(|c| !c.expose().is_empty()) {
        headers.push((AUTH_HEADER.to_string(), credential.expose().to_string()));
    }

    Ok(PreparedRequest {
        method: request.method,
        url,
        path: request.path.clone(),
        headers,
        body: request.body.clone(),
        timeout: config.timeout,
    })
}

fn resolve_url(config: &ClientConfig, path: &str) -> Result<Url, PrepareError> {
    let base = config.base_url.as_str().trim_end_matches('/');
    let raw = if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    };
    Url::parse(&raw).map_err(|error| PrepareError::InvalidUrl {
        url: raw.clone(),
        reason: error.to_string(),
    })
}

fn with_query(mut url: Url, query: &[(String, String)]) -> Result<Url, PrepareError> {
    if query.is_empty() {
        return Ok(url);
    }
    let encoded =
        serde_urlencoded::to_string(query).map_err(|error| PrepareError::Query(error.to_string()))?;
    url.set_query(Some(&encoded));
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use janitor_domain::{HttpMethod, ListFilter, ListQuery};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config(base: &str) -> ClientConfig {
        ClientConfig::new(Url::parse(base).unwrap())
    }

    #[test]
    fn test_credential_is_injected() {
        let credential = Credential::new("secret");
        let prepared =
            prepare_request(&ApiRequest::get("/project"), Some(&credential), &config("http://api"))
                .unwrap();
        assert_eq!(prepared.header("x-api-key"), Some("secret"));
        assert_eq!(prepared.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_auth_header_absent_without_credential() {
        let prepared =
            prepare_request(&ApiRequest::get("/project"), None, &config("http://api")).unwrap();
        assert_eq!(prepared.header(AUTH_HEADER), None);
        assert!(prepared.headers.iter().all(|(name, _)| name != AUTH_HEADER));
    }

    #[test]
    fn test_empty_credential_is_treated_as_absent() {
        let empty = Credential::new("");
        let prepared =
            prepare_request(&ApiRequest::get("/"), Some(&empty), &config("http://api")).unwrap();
        assert_eq!(prepared.header(AUTH_HEADER), None);
    }

    #[test]
    fn test_paths_join_base_url() {
        let cfg = config("http://localhost:3000/api/");
        let prepared = prepare_request(&ApiRequest::get("task/4"), None, &cfg).unwrap();
        assert_eq!(prepared.url.as_str(), "http://localhost:3000/api/task/4");
        assert_eq!(prepared.path, "task/4");

        let root = prepare_request(&ApiRequest::get("/"), None, &config("http://localhost:3000"))
            .unwrap();
        assert_eq!(root.url.as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_list_query_is_encoded() {
        let list = ListQuery::page(2, 20)
            .with_search("login bug")
            .with_filter(ListFilter::new("status", "open"));
        let request = ApiRequest::get("/task").with_list_query(&list);
        let prepared = prepare_request(&request, None, &config("http://api")).unwrap();
        assert_eq!(
            prepared.url.query(),
            Some("page=2&size=20&search=login+bug&filter=status%3Aopen")
        );
    }

    #[test]
    fn test_body_and_timeout_carried() {
        let request = ApiRequest::post("/project", json!({"name": "Janitor"}));
        let prepared = prepare_request(&request, None, &config("http://api")).unwrap();
        assert_eq!(prepared.method, HttpMethod::Post);
        assert_eq!(prepared.body, Some(json!({"name": "Janitor"})));
        assert_eq!(prepared.timeout, std::time::Duration::from_secs(30));
    }
}
