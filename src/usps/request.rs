use xmltree::{Element, EmitterConfig, XMLNode};

use crate::usps::error::ValidationError;
use crate::usps::models::Address;

const API_NAME: &str = "Verify";
const ZIP5_LEN: usize = 5;

/// Builds the `AddressValidateRequest` document for a single address.
///
/// USPS `Address1` is the apartment/suite line and `Address2` the street line,
/// hence the crossed mapping with our own line numbering.
pub fn build_request_xml(user_id: &str, address: &Address) -> Result<String, ValidationError> {
    let (zip5, zip4) = split_zip_code(&address.zip_code);

    let mut address_xml = Element::new("Address");
    address_xml.attributes.insert("ID".into(), "0".into());
    add_child(&mut address_xml, "Address1", &address.address_line_2);
    add_child(&mut address_xml, "Address2", &address.address_line_1);
    add_child(&mut address_xml, "City", &address.city);
    add_child(&mut address_xml, "State", &address.state);
    add_child(&mut address_xml, "Zip5", &zip5);
    add_child(&mut address_xml, "Zip4", &zip4);

    let mut request = Element::new("AddressValidateRequest");
    request.attributes.insert("USERID".into(), user_id.into());
    request.children.push(XMLNode::Element(address_xml));

    let mut buffer = Vec::new();
    request.write_with_config(
        &mut buffer,
        EmitterConfig::new().write_document_declaration(false)
    )?;

    Ok(String::from_utf8(buffer)?)
}

/// Query parameters for the Verify API, in the order USPS documents them.
pub fn request_params(xml: &str) -> [(&'static str, &str); 2] {
    [("API", API_NAME), ("XML", xml)]
}

/// Splits `12345-6789` into `12345` and `6789`.
fn split_zip_code(zip_code: &str) -> (String, String) {
    let zip5 = zip_code.chars().take(ZIP5_LEN).collect();
    let zip4 = zip_code
        .chars()
        .skip(ZIP5_LEN)
        .filter(|c| *c != '-')
        .collect();
    (zip5, zip4)
}

fn add_child(parent: &mut Element, name: &str, value: &str) {
    let mut child = Element::new(name);
    child.children.push(XMLNode::Text(value.to_string()));
    parent.children.push(XMLNode::Element(child));
}
