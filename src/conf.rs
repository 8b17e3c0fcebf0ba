use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: String,
    //providers
    pub platsbanken_url: String,
    pub brainwille_url: String,
    pub cinode_url: String,
    pub cinode_token: String,
    pub search_limit: u32,
    pub provider_timeout_secs: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("service_name", "jobsradar")?
            .set_default("listen_port", "8000")?
            .set_default("platsbanken_url", "https://jobsearch.api.jobtechdev.se")?
            .set_default("brainwille_url", "https://api.brainwille.se")?
            .set_default("cinode_url", "https://api.cinode.market")?
            .set_default("cinode_token", "")?
            .set_default("search_limit", 20)?
            .set_default("provider_timeout_secs", 8)?
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
