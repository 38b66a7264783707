use config::Config;

mod config;
mod datamodel;
mod error;
mod logging;
mod server;

#[cfg(test)]
mod client;
#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::default();
    server::serve(&config).await?;
    Ok(())
}
