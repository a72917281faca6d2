use uuid::Uuid;

use crate::domain::company::{
    CompanyDetails, CompanyRecord, EnrichedRecord, EnrichedTable, InsightResult,
};

use super::{CompanyLookup, OpenaiClient, WebsiteScraper};

pub struct EnrichmentPipeline {
    lookup: CompanyLookup,
    scraper: WebsiteScraper,
    openai_client: OpenaiClient,
}

impl EnrichmentPipeline {
    pub fn new(
        lookup: CompanyLookup,
        scraper: WebsiteScraper,
        openai_client: OpenaiClient,
    ) -> Self {
        EnrichmentPipeline {
            lookup,
            scraper,
            openai_client,
        }
    }

    /// Enriches every company in order, one at a time. The table always has
    /// one record per input company.
    pub async fn run(&self, companies: &[CompanyRecord]) -> EnrichedTable {
        let run_id = Uuid::new_v4();
        log::info!(
            "Enrichment run {} started for {} companies",
            run_id,
            companies.len()
        );

        let mut table = Vec::with_capacity(companies.len());
        for company in companies {
            table.push(self.enrich_company(company).await);
        }

        let with_insight = table
            .iter()
            .filter(|r| !r.summary_from_llm.is_empty() || !r.automation_pitch_from_llm.is_empty())
            .count();
        log::info!(
            "Enrichment run {} finished: {} rows, {} with insights",
            run_id,
            table.len(),
            with_insight
        );

        table
    }

    async fn enrich_company(&self, company: &CompanyRecord) -> EnrichedRecord {
        let name = company.company_name.trim();
        if name.is_empty() {
            log::warn!("Skipping row with a blank company name");
            return EnrichedRecord::assemble(company, &CompanyDetails::default(), None);
        }

        let details = match self.lookup.lookup(name).await {
            Ok(details) => details,
            Err(e) => {
                log::warn!("Lookup for {} failed: {}", name, e);
                CompanyDetails::default()
            }
        };

        let insight = match details.website.as_deref().map(str::trim) {
            Some(website) if !website.is_empty() => self.analyze_website(name, website).await,
            _ => None,
        };

        EnrichedRecord::assemble(company, &details, insight.as_ref())
    }

    async fn analyze_website(&self, name: &str, website: &str) -> Option<InsightResult> {
        let text = match self.scraper.scrape(website).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Scraping {} for {} failed: {}", website, name, e);
                return None;
            }
        };

        match self.openai_client.generate_insight(&text).await {
            Ok(insight) => Some(insight),
            Err(e) => {
                log::warn!("Insight generation for {} failed: {}", name, e);
                None
            }
        }
    }
}
