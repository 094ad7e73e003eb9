mod route_api;

use crate::{
    api::API,
    config::Config,
    entities::Profile,
    error::Error,
    external::openroute,
};

pub struct Engine {
    directions: openroute::Client,
    default_profile: Profile,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: &Config) -> Result<Self, Error> {
        let directions =
            openroute::Client::new(config.api_base.clone(), &config.api_key, config.timeout)?;

        tracing::info!(
            provider = %config.api_base,
            default_profile = %config.default_profile,
            "directions provider configured"
        );

        Ok(Self {
            directions,
            default_profile: config.default_profile,
        })
    }
}

impl API for Engine {}
