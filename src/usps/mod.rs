use log::{debug, error};

use crate::config::UspsConfig;
use crate::usps::error::ValidationError;
use crate::usps::models::{Address, ValidatedAddress};
use crate::usps::request::{build_request_xml, request_params};
use crate::usps::response::parse_response;

pub mod error;
pub mod models;
pub mod request;
pub mod response;

/// Client of the USPS Verify API.
pub struct UspsValidator {
    client: reqwest::Client,
    api_url: String,
    user_id: String
}

impl UspsValidator {
    pub fn new(config: &UspsConfig) -> Result<UspsValidator, ValidationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(UspsValidator {
            client,
            api_url: config.api_url.clone(),
            user_id: config.user_id.clone()
        })
    }

    /// Validates an address over the USPS API.
    ///
    /// Empty fields are allowed, USPS fills them in when it can. Fields USPS
    /// returns that have no `Address` counterpart end up in `usps_extra`.
    pub async fn validate(&self, address: &Address) -> Result<ValidatedAddress, ValidationError> {
        debug!("USPS validation request: {:?}", address);

        let xml = build_request_xml(&self.user_id, address)?;
        let request = self
            .client
            .get(&self.api_url)
            .query(&request_params(&xml))
            .build()?;

        debug!("Issuing request: {}", request.url());
        let body = match self.fetch(request).await {
            Ok(body) => body,
            Err(err) => {
                error!("Request failed: {}", err);
                return Err(err.into());
            },
        };
        debug!("Received response.");

        let validated = parse_response(&body)?;
        debug!("Parsed response: {:?}", validated);
        Ok(validated)
    }

    async fn fetch(&self, request: reqwest::Request) -> Result<bytes::Bytes, reqwest::Error> {
        self.client
            .execute(request)
            .await?
            .error_for_status()?
            .bytes()
            .await
    }
}
