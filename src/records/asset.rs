// Asset - owned property record

use crate::money::Money;
use crate::records::{validate_field, FieldError, ATTRIBUTE_DELIMITER};
use std::fmt;

/// An asset owned by a client (property, vehicle, portfolio).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    name: String,
    kind: String,
    value: Money,
    remarks: String,
}

impl Asset {
    pub const ARITY: usize = 4;

    pub fn new(name: &str, kind: &str, value: &str, remarks: &str) -> Result<Self, FieldError> {
        Ok(Asset {
            name: validate_field("asset name", name)?,
            kind: validate_field("asset type", kind)?,
            value: Money::parse(value).map_err(|e| FieldError::new("asset value", e.to_string()))?,
            remarks: validate_field("asset remarks", remarks)?,
        })
    }

    pub fn from_attributes(attrs: &[&str]) -> Result<Self, FieldError> {
        if attrs.len() != Self::ARITY {
            return Err(FieldError::new(
                "asset",
                format!("expected {} attributes, got {}", Self::ARITY, attrs.len()),
            ));
        }
        Asset::new(attrs[0], attrs[1], attrs[2], attrs[3])
    }

    pub fn from_attribute_string(s: &str) -> Result<Self, FieldError> {
        let attrs: Vec<&str> = s.split(ATTRIBUTE_DELIMITER).collect();
        Asset::from_attributes(&attrs)
    }

    pub fn to_attribute_string(&self) -> String {
        [
            self.name.clone(),
            self.kind.clone(),
            self.value.to_string(),
            self.remarks.clone(),
        ]
        .join(ATTRIBUTE_DELIMITER)
    }

    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Type", self.kind.clone()),
            ("Value", self.value.to_string()),
            ("Remarks", self.remarks.clone()),
        ]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn value(&self) -> Money {
        self.value
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Asset[name: {}; type: {}; value: {}; remarks: {}]",
            self.name, self.kind, self.value, self.remarks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn valid_asset() -> Asset {
        Asset::new("Good Class Bungalow", "Property", "$2000000", "Freehold, Bukit Timah")
            .expect("valid asset")
    }

    #[test]
    fn test_constructor_validates_every_field() {
        assert!(Asset::new("", "Property", "$1", "r").is_err());
        assert!(Asset::new("House", "a\nb", "$1", "r").is_err());
        assert!(Asset::new("House", "Property", "1", "r").is_err());
        assert!(Asset::new("House", "Property", "$1", "  ").is_err());
    }

    #[test]
    fn test_attribute_string_round_trip() {
        let asset = valid_asset();
        let restored =
            Asset::from_attribute_string(&asset.to_attribute_string()).expect("round trip");
        assert_eq!(restored, asset);
    }

    #[test]
    fn test_set_keeps_assets_differing_in_one_attribute() {
        let mut set = HashSet::new();
        set.insert(valid_asset());
        set.insert(
            Asset::new("Good Class Bungalow", "Property", "$2000001", "Freehold, Bukit Timah")
                .expect("valid asset"),
        );
        assert_eq!(set.len(), 2);
    }
}
