use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub api_keys: ApiKeys,
    pub company_lookup: CompanyLookupSettings,
    pub scraper: ScraperSettings,
    pub insight: InsightSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct ApiKeys {
    pub clearbit: String,
    pub openai: String,
}

#[derive(Deserialize, Clone)]
pub struct CompanyLookupSettings {
    pub base_url: String,
}

#[derive(Deserialize, Clone)]
pub struct ScraperSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct InsightSettings {
    pub api_base: String,
    pub model: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_tokens: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub temperature: f32,
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Reads `configuration/base.yaml`, the per-environment file, `APP_*` variables
/// and finally the conventional `CLEARBIT_API_KEY` / `OPENAI_API_KEY` secrets.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("No current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("api_keys.clearbit", std::env::var("CLEARBIT_API_KEY").ok())?
        .set_override_option("api_keys.openai", std::env::var("OPENAI_API_KEY").ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}
