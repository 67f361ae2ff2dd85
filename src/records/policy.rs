// Policy - insurance policy record

use crate::money::Money;
use crate::records::{validate_field, FieldError, ATTRIBUTE_DELIMITER};
use std::fmt;

/// An insurance policy held by a client.
///
/// Immutable value object; two policies are equal iff every attribute is
/// equal, so a client's policy set never holds two attribute-identical
/// entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Policy {
    name: String,
    insurer: String,
    insured_value: Money,
    yearly_premium: Money,
    commission: Money,
}

impl Policy {
    /// Number of delimiter-separated attributes in the textual form.
    pub const ARITY: usize = 5;

    pub fn new(
        name: &str,
        insurer: &str,
        insured_value: &str,
        yearly_premium: &str,
        commission: &str,
    ) -> Result<Self, FieldError> {
        Ok(Policy {
            name: validate_field("policy name", name)?,
            insurer: validate_field("policy insurer", insurer)?,
            insured_value: parse_money("policy insured value", insured_value)?,
            yearly_premium: parse_money("policy yearly premium", yearly_premium)?,
            commission: parse_money("policy commission", commission)?,
        })
    }

    /// Build a policy from an ordered attribute list.
    pub fn from_attributes(attrs: &[&str]) -> Result<Self, FieldError> {
        if attrs.len() != Self::ARITY {
            return Err(FieldError::new(
                "policy",
                format!("expected {} attributes, got {}", Self::ARITY, attrs.len()),
            ));
        }
        Policy::new(attrs[0], attrs[1], attrs[2], attrs[3], attrs[4])
    }

    /// Parse the `;;;`-delimited single-string form.
    pub fn from_attribute_string(s: &str) -> Result<Self, FieldError> {
        let attrs: Vec<&str> = s.split(ATTRIBUTE_DELIMITER).collect();
        Policy::from_attributes(&attrs)
    }

    /// The `;;;`-delimited single-string form used by import and storage.
    pub fn to_attribute_string(&self) -> String {
        [
            self.name.clone(),
            self.insurer.clone(),
            self.insured_value.to_string(),
            self.yearly_premium.to_string(),
            self.commission.to_string(),
        ]
        .join(ATTRIBUTE_DELIMITER)
    }

    /// Labelled attributes in display order, for the policies tab table.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Insurer", self.insurer.clone()),
            ("Insured Value", self.insured_value.to_string()),
            ("Yearly Premium", self.yearly_premium.to_string()),
            ("Commission", self.commission.to_string()),
        ]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insurer(&self) -> &str {
        &self.insurer
    }

    pub fn insured_value(&self) -> Money {
        self.insured_value
    }

    pub fn yearly_premium(&self) -> Money {
        self.yearly_premium
    }

    pub fn commission(&self) -> Money {
        self.commission
    }
}

fn parse_money(field: &str, token: &str) -> Result<Money, FieldError> {
    Money::parse(token).map_err(|e| FieldError::new(field, e.to_string()))
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Policy[name: {}; insurer: {}; insured value: {}; yearly premium: {}; commission: {}]",
            self.name, self.insurer, self.insured_value, self.yearly_premium, self.commission
        )
    }
}
