use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub company_name: String,
}

impl CompanyRecord {
    pub fn new(company_name: impl Into<String>) -> Self {
        CompanyRecord {
            company_name: company_name.into(),
        }
    }
}

/// Firmographics returned by the directory lookup. Every field is optional,
/// the default value stands in for a failed lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyDetails {
    pub website: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<u64>,
    pub hq_location: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightResult {
    pub summary: String,
    pub target_customer: String,
    pub automation_idea: String,
}

impl InsightResult {
    /// Builds a result from the model's JSON object. Missing or null keys
    /// become empty strings, other non-string values keep their JSON text.
    pub fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        let field = |key: &str| match object.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        InsightResult {
            summary: field("summary"),
            target_customer: field("target_customer"),
            automation_idea: field("automation_idea"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub company_name: String,
    pub website: String,
    pub industry: String,
    pub summary_from_llm: String,
    pub automation_pitch_from_llm: String,
}

impl EnrichedRecord {
    pub fn assemble(
        company: &CompanyRecord,
        details: &CompanyDetails,
        insight: Option<&InsightResult>,
    ) -> Self {
        EnrichedRecord {
            company_name: company.company_name.clone(),
            website: details.website.clone().unwrap_or_default(),
            industry: details.industry.clone().unwrap_or_default(),
            summary_from_llm: insight.map(|i| i.summary.clone()).unwrap_or_default(),
            automation_pitch_from_llm: insight
                .map(|i| i.automation_idea.clone())
                .unwrap_or_default(),
        }
    }
}

pub type EnrichedTable = Vec<EnrichedRecord>;
