use std::{net::TcpListener, time::Duration};

use enricher::{
    configuration::get_configuration,
    services::{CompanyLookup, EnrichmentPipeline, OpenaiClient, WebsiteScraper},
    startup::run,
};
use env_logger::Env;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let lookup = CompanyLookup::new(
        configuration.api_keys.clearbit,
        &configuration.company_lookup.base_url,
    );
    let scraper = WebsiteScraper::new(Duration::from_secs(configuration.scraper.timeout_secs))
        .expect("Failed to build homepage client.");
    let openai_client = OpenaiClient::new(configuration.api_keys.openai, &configuration.insight);
    let pipeline = EnrichmentPipeline::new(lookup, scraper, openai_client);

    log::info!("Listening on {}", listener.local_addr()?);

    run(listener, pipeline)?.await
}
