// Liability - outstanding obligation record

use crate::money::Money;
use crate::records::{validate_field, FieldError, ATTRIBUTE_DELIMITER};
use std::fmt;

/// A liability owed by a client (loan, debt, mortgage).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Liability {
    name: String,
    kind: String,
    value: Money,
    remarks: String,
}

impl Liability {
    pub const ARITY: usize = 4;

    pub fn new(name: &str, kind: &str, value: &str, remarks: &str) -> Result<Self, FieldError> {
        Ok(Liability {
            name: validate_field("liability name", name)?,
            kind: validate_field("liability type", kind)?,
            value: Money::parse(value)
                .map_err(|e| FieldError::new("liability value", e.to_string()))?,
            remarks: validate_field("liability remarks", remarks)?,
        })
    }

    pub fn from_attributes(attrs: &[&str]) -> Result<Self, FieldError> {
        if attrs.len() != Self::ARITY {
            return Err(FieldError::new(
                "liability",
                format!("expected {} attributes, got {}", Self::ARITY, attrs.len()),
            ));
        }
        Liability::new(attrs[0], attrs[1], attrs[2], attrs[3])
    }

    pub fn from_attribute_string(s: &str) -> Result<Self, FieldError> {
        let attrs: Vec<&str> = s.split(ATTRIBUTE_DELIMITER).collect();
        Liability::from_attributes(&attrs)
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

impl fmt::Display for Liability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Liability[name: {}; type: {}; value: {}; remarks: {}]",
            self.name, self.kind, self.value, self.remarks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VALID_NAME: &str = "Mortgage debt";
    const VALID_KIND: &str = "Debt";
    const VALID_VALUE: &str = "$2000";
    const VALID_REMARKS: &str = "23 year loan from DBS Bank.";

    fn valid_liability() -> Liability {
        Liability::new(VALID_NAME, VALID_KIND, VALID_VALUE, VALID_REMARKS)
            .expect("valid liability")
    }

    #[test]
    fn test_constructor_invalid_remarks() {
        assert!(Liability::new(VALID_NAME, VALID_KIND, VALID_VALUE, "one million dollars \n").is_err());
        assert!(Liability::new(VALID_NAME, VALID_KIND, VALID_VALUE, " ").is_err());
    }

    #[test]
    fn test_constructor_invalid_value() {
        assert!(Liability::new(VALID_NAME, VALID_KIND, "one million dollars", VALID_REMARKS).is_err());
        assert!(Liability::new(VALID_NAME, VALID_KIND, "", VALID_REMARKS).is_err());
        assert!(Liability::new(VALID_NAME, VALID_KIND, "2000", VALID_REMARKS).is_err());
    }

    #[test]
    fn test_constructor_invalid_kind() {
        assert!(Liability::new(VALID_NAME, "debt \n collateral", VALID_VALUE, VALID_REMARKS).is_err());
        assert!(Liability::new(VALID_NAME, " ", VALID_VALUE, VALID_REMARKS).is_err());
    }

    #[test]
    fn test_constructor_invalid_name() {
        assert!(Liability::new("john \n doe", VALID_KIND, VALID_VALUE, VALID_REMARKS).is_err());
        assert!(Liability::new(" ", VALID_KIND, VALID_VALUE, VALID_REMARKS).is_err());
    }

    #[test]
    fn test_value_preserves_token_form() {
        let liability = valid_liability();
        assert_eq!(liability.value().to_string(), VALID_VALUE);
        assert_eq!(liability.value().cents(), 200_000);
    }

    #[test]
    fn test_attribute_string_round_trip() {
        let liability = valid_liability();
        let restored = Liability::from_attribute_string(&liability.to_attribute_string())
            .expect("round trip");
        assert_eq!(restored, liability);
    }
}
