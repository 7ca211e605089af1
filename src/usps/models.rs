use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Postal address as exchanged with callers of the validation endpoint.
///
/// Missing and `null` fields both read as empty strings.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_empty")]
    pub address_line_1: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub address_line_2: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub zip_code: String
}

/// Address corrected by USPS, with any field we don't map kept verbatim.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedAddress {
    #[serde(flatten)]
    pub address: Address,
    pub usps_extra: BTreeMap<String, String>
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::Address;

    #[test]
    fn test_null_and_missing_fields_are_empty() {
        let address: Address = serde_json::from_str(
            r#"{"address_line_1": "1 Main", "address_line_2": null, "zip_code": null}"#
        )
        .unwrap();

        assert_eq!(address, Address {
            address_line_1: "1 Main".to_string(),
            ..Address::default()
        });
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let address: Address = serde_json::from_str(
            r#"{"city": "Greenbelt", "country": "US", "notes": [1, 2]}"#
        )
        .unwrap();

        assert_eq!(address.city, "Greenbelt");
        assert_eq!(address.state, "");
    }
}
