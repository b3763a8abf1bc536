use crate::{
    config::Config,
    environment::Environment,
    upstream::{UpstreamClient, UpstreamError},
};

#[derive(Clone, Debug)]
pub struct App {
    pub config: Config,
    pub environment: Environment,
    pub upstream: UpstreamClient,
}

impl App {
    pub fn new(config: Config, environment: Environment) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;

        Ok(Self {
            config,
            environment,
            upstream,
        })
    }
}
