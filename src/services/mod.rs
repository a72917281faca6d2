pub mod company_lookup;
pub mod enrichment;
pub mod openai_client;
pub mod website_scraper;

pub use company_lookup::*;
pub use enrichment::*;
pub use openai_client::*;
pub use website_scraper::*;
