// Person - immutable client aggregate with validated contact fields

use crate::records::{Asset, FieldError, Liability, Policy};
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// CONTACT FIELD NEWTYPES
// ============================================================================

/// Client name; also the identity key used to match a person across store
/// replace operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    /// Alphanumeric words separated by single spaces, first character
    /// alphanumeric.
    pub fn new(value: &str) -> Result<Self, FieldError> {
        let valid = !value.is_empty()
            && value.chars().next().is_some_and(|c| c.is_alphanumeric())
            && value.chars().all(|c| c.is_alphanumeric() || c == ' ')
            && !value.ends_with(' ')
            && !value.contains("  ");
        if valid {
            Ok(Name(value.to_string()))
        } else {
            Err(FieldError::new(
                "name",
                "names should only contain alphanumeric characters and single spaces, \
                 and should not be blank",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    /// Digits only, at least 3 of them.
    pub fn new(value: &str) -> Result<Self, FieldError> {
        if value.len() >= 3 && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Phone(value.to_string()))
        } else {
            Err(FieldError::new(
                "phone",
                "phone numbers should only contain digits and be at least 3 digits long",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// `local@domain`: word characters plus `+._-` in the local part, at
    /// least two `[A-Za-z0-9.-]` characters in the domain, neither part
    /// starting or ending with a separator.
    pub fn new(value: &str) -> Result<Self, FieldError> {
        let err = || {
            FieldError::new(
                "email",
                "emails should be of the form local-part@domain and should not be blank",
            )
        };

        let (local, domain) = value.split_once('@').ok_or_else(err)?;

        let local_ok = !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '_' | '-'))
            && !local.starts_with(['+', '.', '_', '-'])
            && !local.ends_with(['+', '.', '_', '-']);

        let domain_ok = domain.len() >= 2
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
            && !domain.starts_with(['.', '-'])
            && !domain.ends_with(['.', '-']);

        if local_ok && domain_ok {
            Ok(Email(value.to_string()))
        } else {
            Err(err())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Non-blank single-line text.
    pub fn new(value: &str) -> Result<Self, FieldError> {
        if value.trim().is_empty() || value.contains('\n') || value.contains('\r') {
            Err(FieldError::new(
                "address",
                "addresses can take any single-line value and should not be blank",
            ))
        } else {
            Ok(Address(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Single alphanumeric word labelling a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    pub fn new(value: &str) -> Result<Self, FieldError> {
        if !value.is_empty() && value.chars().all(|c| c.is_alphanumeric()) {
            Ok(Tag(value.to_string()))
        } else {
            Err(FieldError::new("tag", "tags should be one alphanumeric word"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form notes; may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Notes(String);

impl Notes {
    pub fn new(value: &str) -> Self {
        Notes(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Notes with `line` appended as a new paragraph line.
    pub fn with_appended(&self, line: &str) -> Notes {
        if self.0.is_empty() {
            Notes(line.to_string())
        } else {
            Notes(format!("{}\n{}", self.0, line))
        }
    }
}

/// Scalar contact field selected by an `edit` command on the contact tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Phone,
    Email,
    Address,
}

impl ContactField {
    pub fn name(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Phone => "phone",
            ContactField::Email => "email",
            ContactField::Address => "address",
        }
    }
}

// ============================================================================
// PERSON
// ============================================================================

/// A client record.
///
/// Immutable aggregate: every edit produces a new `Person` with the changed
/// aspect replaced and all other fields carried over unchanged. Identity
/// equality ([`Person::is_same_person`]) is name-based; full `==` compares
/// every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    tags: HashSet<Tag>,
    notes: Notes,
    policies: HashSet<Policy>,
    liabilities: HashSet<Liability>,
    assets: HashSet<Asset>,
}

impl Person {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        tags: HashSet<Tag>,
        notes: Notes,
        policies: HashSet<Policy>,
        liabilities: HashSet<Liability>,
        assets: HashSet<Asset>,
    ) -> Self {
        Person {
            name,
            phone,
            email,
            address,
            tags,
            notes,
            policies,
            liabilities,
            assets,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn tags(&self) -> &HashSet<Tag> {
        &self.tags
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    pub fn policies(&self) -> &HashSet<Policy> {
        &self.policies
    }

    pub fn liabilities(&self) -> &HashSet<Liability> {
        &self.liabilities
    }

    pub fn assets(&self) -> &HashSet<Asset> {
        &self.assets
    }

    /// True iff both persons carry the same name (identity key).
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name
    }

    /// New person with one scalar contact field replaced; the raw value is
    /// validated by the field's own constructor.
    pub fn with_field(&self, field: ContactField, value: &str) -> Result<Person, FieldError> {
        let mut next = self.clone();
        match field {
            ContactField::Name => next.name = Name::new(value)?,
            ContactField::Phone => next.phone = Phone::new(value)?,
            ContactField::Email => next.email = Email::new(value)?,
            ContactField::Address => next.address = Address::new(value)?,
        }
        Ok(next)
    }

    pub fn with_notes(&self, notes: Notes) -> Person {
        let mut next = self.clone();
        next.notes = notes;
        next
    }

    pub fn with_policies(&self, policies: HashSet<Policy>) -> Person {
        let mut next = self.clone();
        next.policies = policies;
        next
    }

    pub fn with_liabilities(&self, liabilities: HashSet<Liability>) -> Person {
        let mut next = self.clone();
        next.liabilities = liabilities;
        next
    }

    pub fn with_assets(&self, assets: HashSet<Asset>) -> Person {
        let mut next = self.clone();
        next.assets = assets;
        next
    }

    /// Labelled scalar attributes in display order, for the contact tab.
    pub fn contact_attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.as_str().to_string()),
            ("Phone", self.phone.as_str().to_string()),
            ("Email", self.email.as_str().to_string()),
            ("Address", self.address.as_str().to_string()),
        ]
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}",
            self.name.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.address.as_str()
        )?;
        if !self.tags.is_empty() {
            let mut tags: Vec<&str> = self.tags.iter().map(Tag::as_str).collect();
            tags.sort_unstable();
            write!(f, "; Tags: {}", tags.join(", "))?;
        }
        if !self.notes.is_empty() {
            write!(f, "; Notes: {}", self.notes.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn person(name: &str) -> Person {
        Person::new(
            Name::new(name).expect("valid name"),
            Phone::new("87438807").expect("valid phone"),
            Email::new("client@example.com").expect("valid email"),
            Address::new("Blk 30 Geylang Street 29, #06-40").expect("valid address"),
            HashSet::new(),
            Notes::default(),
            HashSet::new(),
            HashSet::new(),
            HashSet::new(),
        )
    }

    #[test]
    fn test_name_validation() {
        assert!(Name::new("Alex Yeoh").is_ok());
        assert!(Name::new("Tan Ah Kow 2nd").is_ok());
        assert!(Name::new("").is_err());
        assert!(Name::new(" Alex").is_err());
        assert!(Name::new("Alex ").is_err());
        assert!(Name::new("Alex  Yeoh").is_err());
        assert!(Name::new("S/O Someone").is_err());
    }

    #[test]
    fn test_phone_validation() {
        assert!(Phone::new("911").is_ok());
        assert!(Phone::new("93121534").is_ok());
        assert!(Phone::new("91").is_err());
        assert!(Phone::new("9011p041").is_err());
        assert!(Phone::new("9312 1534").is_err());
    }

    #[test]
    fn test_email_validation() {
        assert!(Email::new("alexyeoh@example.com").is_ok());
        assert!(Email::new("a1+be.d@sub.example-1.com").is_ok());
        assert!(Email::new("peterjack@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("peterjackexample.com").is_err());
        assert!(Email::new(".peter@example.com").is_err());
        assert!(Email::new("peter@-example.com").is_err());
        assert!(Email::new("peter@e").is_err());
    }

    #[test]
    fn test_address_validation() {
        assert!(Address::new("Blk 456, Den Road, #01-355").is_ok());
        assert!(Address::new("-").is_ok());
        assert!(Address::new("").is_err());
        assert!(Address::new(" ").is_err());
        assert!(Address::new("line one\nline two").is_err());
    }

    #[test]
    fn test_tag_validation() {
        assert!(Tag::new("friends").is_ok());
        assert!(Tag::new("").is_err());
        assert!(Tag::new("close friends").is_err());
    }

    #[test]
    fn test_is_same_person_compares_names_only() {
        let a = person("Alex Yeoh");
        let b = person("Alex Yeoh").with_field(ContactField::Phone, "99999999").unwrap();
        let c = person("Bernice Yu");
        assert!(a.is_same_person(&b));
        assert!(!a.is_same_person(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn test_with_field_replaces_only_that_field() {
        let before = person("Alex Yeoh");
        let after = before.with_field(ContactField::Name, "Allison Wang").unwrap();
        assert_eq!(after.name().as_str(), "Allison Wang");
        assert_eq!(after.phone(), before.phone());
        assert_eq!(after.email(), before.email());
        assert_eq!(after.address(), before.address());
    }

    #[test]
    fn test_with_field_rejects_invalid_value() {
        let before = person("Alex Yeoh");
        assert!(before.with_field(ContactField::Phone, "not a phone").is_err());
    }

    #[test]
    fn test_notes_append() {
        let empty = Notes::default();
        let one = empty.with_appended("Likes bread");
        let two = one.with_appended("Has 2 children");
        assert_eq!(one.as_str(), "Likes bread");
        assert_eq!(two.as_str(), "Likes bread\nHas 2 children");
    }
}
