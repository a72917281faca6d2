use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::company::CompanyDetails;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("directory lookup returned status {0}")]
    Status(StatusCode),
    #[error("directory lookup request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("directory lookup returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct CompanyLookup {
    client: Client,
    api_key: String,
    url: String,
}

#[derive(Serialize)]
struct FindQuery<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct FindResponse {
    domain: Option<String>,
    category: Option<Category>,
    metrics: Option<Metrics>,
    location: Option<Value>,
}

#[derive(Deserialize)]
struct Category {
    industry: Option<String>,
}

#[derive(Deserialize)]
struct Metrics {
    employees: Option<Value>,
}

/// A headcount given as a number or a numeric string. Ranges, fractions and
/// negative values are treated as unknown.
fn employee_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl From<FindResponse> for CompanyDetails {
    fn from(value: FindResponse) -> Self {
        CompanyDetails {
            website: value.domain,
            industry: value.category.and_then(|c| c.industry),
            company_size: value
                .metrics
                .and_then(|m| m.employees)
                .and_then(|e| employee_count(&e)),
            hq_location: value.location,
        }
    }
}

impl CompanyLookup {
    pub fn new(api_key: String, base_url: &str) -> Self {
        CompanyLookup {
            client: Client::new(),
            api_key,
            url: format!("{}/v2/companies/find", base_url.trim_end_matches('/')),
        }
    }

    pub async fn lookup(&self, company_name: &str) -> Result<CompanyDetails, LookupError> {
        let res = self
            .client
            .get(&self.url)
            .bearer_auth(&self.api_key)
            .query(&FindQuery { name: company_name })
            .send()
            .await?;

        if res.status() != StatusCode::OK {
            return Err(LookupError::Status(res.status()));
        }

        let body = res.text().await?;
        let found: FindResponse = serde_json::from_str(&body)?;

        log::info!(
            "Directory lookup for {} found domain {:?}",
            company_name,
            found.domain
        );

        Ok(found.into())
    }
}
