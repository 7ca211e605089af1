use std::collections::BTreeMap;

use log::{error, warn};
use xmltree::Element;

use crate::usps::error::ValidationError;
use crate::usps::models::{Address, ValidatedAddress};
use crate::utils::NonEmptyExtension;

/// Parses a Verify API response and classifies it.
///
/// A root `Error` element means USPS rejected the request itself, while an
/// `Error` nested in `Address` means the address couldn't be validated.
pub fn parse_response(body: &[u8]) -> Result<ValidatedAddress, ValidationError> {
    let root = Element::parse(body).map_err(|err| {
        error!("Unable to parse response as XML: {}", err);
        ValidationError::from(err)
    })?;

    if root.name == "Error" {
        let description = error_description(&root)?;
        error!("USPS API responded with an error: {}", description);
        return Err(ValidationError::Api(description));
    }

    let address_xml = root
        .get_child("Address")
        .ok_or_else(|| malformed("Response has no Address element"))?;

    if let Some(error_xml) = address_xml.get_child("Error") {
        let description = error_description(error_xml)?;
        warn!("USPS API responded with an address error: {}", description);
        return Err(ValidationError::Address(description));
    }

    Ok(translate(address_xml))
}

fn translate(address_xml: &Element) -> ValidatedAddress {
    let mut fields: BTreeMap<String, String> = address_xml
        .children
        .iter()
        .filter_map(|node| node.as_element())
        .map(|element| (element.name.clone(), text_of(element)))
        .collect();

    let mut zip_code = fields.remove("Zip5").unwrap_or_default();
    if let Some(zip4) = fields.remove("Zip4").non_empty() {
        zip_code.push('-');
        zip_code.push_str(&zip4);
    }

    let address = Address {
        address_line_1: fields.remove("Address2").unwrap_or_default(),
        address_line_2: fields.remove("Address1").unwrap_or_default(),
        city: fields.remove("City").unwrap_or_default(),
        state: fields.remove("State").unwrap_or_default(),
        zip_code
    };

    ValidatedAddress { address, usps_extra: fields }
}

/// Text of the `Description` under an `Error`, which USPS always fills in.
fn error_description(error_xml: &Element) -> Result<String, ValidationError> {
    let description = error_xml
        .get_child("Description")
        .ok_or_else(|| malformed("Error element has no Description"))?;

    Some(text_of(description))
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| malformed("Error Description is empty"))
}

fn text_of(element: &Element) -> String {
    element
        .get_text()
        .map(|text| text.into_owned())
        .unwrap_or_default()
}

fn malformed(reason: &'static str) -> ValidationError {
    error!("Malformed USPS response: {}", reason);
    ValidationError::Transport(Box::new(reason))
}
