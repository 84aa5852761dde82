use anyhow::Context;
use homebase_server::Config;
use rolling_logger::LoggerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;

    rolling_logger::init_logger(LoggerConfig::new(&config.log_dir, "homebase").keep(config.log_keep))
        .context("failed to init rolling logger")?;

    homebase_server::run(config).await
}
