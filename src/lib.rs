pub mod api;
pub mod civicrm;
pub mod config;
pub mod usps;
mod utils;
