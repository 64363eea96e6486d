//! randomuser.me-compatible sample source

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::ContactSource;
use crate::models::NewContact;

/// Default endpoint for sample contacts
pub const DEFAULT_SOURCE_URL: &str = "https://randomuser.me/api/";

/// Fetch timeout in seconds
const FETCH_TIMEOUT: u64 = 10;

#[derive(Debug, Deserialize)]
struct RandomUserResponse {
    results: Vec<RandomUser>,
}

#[derive(Debug, Deserialize)]
struct RandomUser {
    name: RandomUserName,
    phone: String,
}

#[derive(Debug, Deserialize)]
struct RandomUserName {
    first: String,
    last: String,
}

/// Fetches sample contacts from a randomuser.me-style HTTP API
#[derive(Debug, Clone)]
pub struct RandomUserSource {
    url: String,
    sample_size: usize,
}

impl RandomUserSource {
    pub fn new(url: impl Into<String>, sample_size: usize) -> Self {
        Self {
            url: url.into(),
            sample_size,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ContactSource for RandomUserSource {
    async fn fetch_sample_contacts(&self) -> Result<Vec<NewContact>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT))
            .user_agent(concat!("phonebook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!("Fetching {} sample contact(s) from {}", self.sample_size, self.url);

        let response = client
            .get(&self.url)
            .query(&[
                ("results", self.sample_size.to_string()),
                ("inc", "name,phone".to_string()),
                ("noinfo", String::new()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.url))?;

        if !response.status().is_success() {
            bail!("Sample source returned {}", response.status());
        }

        let body: RandomUserResponse = response
            .json()
            .await
            .context("Sample source returned an unexpected body")?;

        Ok(into_contacts(body))
    }
}

fn into_contacts(body: RandomUserResponse) -> Vec<NewContact> {
    body.results
        .into_iter()
        .map(|user| {
            let name = format!("{} {}", user.name.first.trim(), user.name.last.trim());
            NewContact::new(name.trim(), user.phone)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let json = r#"{
            "results": [
                {"name": {"title": "Mr", "first": "Bo", "last": "Diddley"}, "phone": "(272) 790-0888"},
                {"name": {"title": "Ms", "first": "Cy", "last": ""}, "phone": "017684 15820"}
            ]
        }"#;
        let body: RandomUserResponse = serde_json::from_str(json).unwrap();
        let contacts = into_contacts(body);

        assert_eq!(
            contacts,
            vec![
                NewContact::new("Bo Diddley", "(272) 790-0888"),
                NewContact::new("Cy", "017684 15820"),
            ]
        );
    }

    #[test]
    fn test_parse_response_rejects_missing_results() {
        let result: Result<RandomUserResponse, _> = serde_json::from_str(r#"{"error": "busy"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_source_keeps_url() {
        let source = RandomUserSource::new(DEFAULT_SOURCE_URL, 5);
        assert_eq!(source.url(), DEFAULT_SOURCE_URL);
    }
}
