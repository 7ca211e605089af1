use actix_web::{Error, HttpResponse, web};
use log::{debug, error, info};
use serde::Serialize;

use crate::usps::models::Address;
use crate::usps::UspsValidator;

#[derive(Serialize)]
pub struct ErrorResponse<'a> {
    error: &'a str
}

/// Validates an address that comes in as JSON data.
///
/// USPS-reported errors are returned as a 400 with an `error` field, any
/// other failure as an empty 500.
pub async fn validate_address(
    address: web::Json<Address>,
    validator: web::Data<UspsValidator>
) -> Result<HttpResponse, Error> {
    info!("Address validation request: {:?}", address.0);

    match validator.validate(&address).await {
        Ok(validated) => {
            debug!("Address validation response: {:?}", validated);
            Ok(HttpResponse::Ok().json(validated))
        },
        Err(err) => match err.client_message() {
            Some(message) => {
                error!("Address validation runtime error: {}", err);
                Ok(HttpResponse::BadRequest().json(ErrorResponse { error: message }))
            },
            None => {
                error!("Address validation unknown error: {}", err);
                Ok(HttpResponse::InternalServerError().finish())
            },
        },
    }
}
