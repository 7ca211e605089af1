use log::info;

use crate::config::CivicrmConfig;

pub mod scheduler;

const JOB_ENTITY: &str = "Job";
const JOB_ACTION: &str = "execute";

pub fn build_client(config: &CivicrmConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
}

/// Runs the CiviCRM scheduled jobs once.
///
/// The response is logged as is, CiviCRM reports job failures in its own log.
pub async fn run_once(
    client: &reqwest::Client,
    config: &CivicrmConfig
) -> Result<(), reqwest::Error> {
    let response = client
        .post(&config.url)
        .form(&[
            ("entity", JOB_ENTITY),
            ("action", JOB_ACTION),
            ("api_key", config.api_key.as_str()),
            ("key", config.site_key.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    info!("CiviCRM job execution responded {}: {}", status, body);

    Ok(())
}
