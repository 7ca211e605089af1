use std::io;

use actix_web::{App, HttpServer, web};
use actix_web::middleware::Logger;
use env_logger::Env;
use log::info;

use muse_integrations::api::validate::validate_address;
use muse_integrations::config::UspsConfig;
use muse_integrations::usps::UspsValidator;

/// Lets browsers validate addresses through the USPS API.
#[actix_rt::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = UspsConfig::from_env()?;
    let validator = UspsValidator::new(&config)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    let validator = web::Data::new(validator);

    info!("Listening on {}", config.bind_address);
    HttpServer::new(move || {
        App::new()
            .app_data(validator.clone())
            .wrap(Logger::default())
            .route("/validate", web::post().to(validate_address))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
