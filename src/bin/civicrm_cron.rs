use std::io;

use env_logger::Env;
use log::info;

use muse_integrations::civicrm::{build_client, run_once};
use muse_integrations::civicrm::scheduler::{JobScheduler, termination_signal};
use muse_integrations::config::CivicrmConfig;

/// Periodically runs the CiviCRM jobs.
#[actix_rt::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = CivicrmConfig::from_env()?;
    let client = build_client(&config)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let scheduler = JobScheduler::new(config.interval);
    scheduler
        .start(|| run_once(&client, &config), termination_signal())
        .await;

    info!("CiviCRM job trigger stopped");
    Ok(())
}
