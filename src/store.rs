// ClientStore - backing client list plus the displayed projection

use crate::person::Person;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Identity-duplicate on add.
    DuplicatePerson,
    /// Identity-keyed lookup found no matching person.
    PersonNotFound,
    /// Display index outside the current projection.
    NoSuchIndex,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicatePerson => {
                write!(f, "This client already exists in the client list.")
            }
            StoreError::PersonNotFound => {
                write!(f, "The client is no longer present in the client list.")
            }
            StoreError::NoSuchIndex => write!(f, "No such index found."),
        }
    }
}

impl std::error::Error for StoreError {}

/// The shared in-memory client list.
///
/// Holds the ordered backing list and an optional keyword filter; the
/// displayed projection is always derived from the backing list, never
/// stored separately. Edits are whole-person replacements keyed by identity
/// (name) and preserve list position.
#[derive(Debug, Clone, Default)]
pub struct ClientStore {
    persons: Vec<Person>,
    filter: Option<Vec<String>>,
}

impl ClientStore {
    pub fn new() -> Self {
        ClientStore::default()
    }

    pub fn from_persons(persons: Vec<Person>) -> Self {
        ClientStore {
            persons,
            filter: None,
        }
    }

    /// The full backing list in stored order.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// The displayed projection: all persons, or those whose name contains
    /// any filter keyword (case-insensitive whole-word match).
    pub fn displayed(&self) -> Vec<&Person> {
        match &self.filter {
            None => self.persons.iter().collect(),
            Some(keywords) => self
                .persons
                .iter()
                .filter(|p| Self::name_matches(p, keywords))
                .collect(),
        }
    }

    fn name_matches(person: &Person, keywords: &[String]) -> bool {
        person
            .name()
            .as_str()
            .split_whitespace()
            .any(|word| keywords.iter().any(|k| word.eq_ignore_ascii_case(k)))
    }

    /// Person at a display-index position in the current projection.
    pub fn displayed_at(&self, index: usize) -> Result<&Person, StoreError> {
        self.displayed()
            .get(index)
            .copied()
            .ok_or(StoreError::NoSuchIndex)
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.iter().any(|p| p.is_same_person(person))
    }

    /// Append a new client; rejects a name already present.
    pub fn add(&mut self, person: Person) -> Result<(), StoreError> {
        if self.has_person(&person) {
            return Err(StoreError::DuplicatePerson);
        }
        self.persons.push(person);
        Ok(())
    }

    /// Remove the person at a display-index position from the backing list.
    pub fn delete_displayed(&mut self, index: usize) -> Result<Person, StoreError> {
        let target = self.displayed_at(index)?.clone();
        let position = self
            .persons
            .iter()
            .position(|p| p.is_same_person(&target))
            .ok_or(StoreError::PersonNotFound)?;
        Ok(self.persons.remove(position))
    }

    /// Atomically replace the person matching `target`'s identity with
    /// `replacement`, preserving its position in the backing list.
    pub fn replace(&mut self, target: &Person, replacement: Person) -> Result<(), StoreError> {
        let position = self
            .persons
            .iter()
            .position(|p| p.is_same_person(target))
            .ok_or(StoreError::PersonNotFound)?;
        self.persons[position] = replacement;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.persons.clear();
        self.filter = None;
    }

    pub fn set_filter(&mut self, keywords: Vec<String>) {
        self.filter = Some(keywords);
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::tests::person;
    use crate::person::ContactField;
    use pretty_assertions::assert_eq;

    fn store() -> ClientStore {
        let mut s = ClientStore::new();
        s.add(person("Alex Yeoh")).unwrap();
        s.add(person("Bernice Yu")).unwrap();
        s.add(person("Charlotte Oliveiro")).unwrap();
        s
    }

    #[test]
    fn test_add_rejects_duplicate_name() {
        let mut s = store();
        assert_eq!(s.add(person("Alex Yeoh")), Err(StoreError::DuplicatePerson));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_filter_matches_whole_words_case_insensitively() {
        let mut s = store();
        s.set_filter(vec!["yeoh".to_string(), "yu".to_string()]);
        let shown: Vec<&str> = s.displayed().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(shown, vec!["Alex Yeoh", "Bernice Yu"]);

        s.set_filter(vec!["Oliv".to_string()]);
        assert!(s.displayed().is_empty(), "partial words should not match");

        s.clear_filter();
        assert_eq!(s.displayed().len(), 3);
    }

    #[test]
    fn test_delete_displayed_uses_projection_index() {
        let mut s = store();
        s.set_filter(vec!["Bernice".to_string()]);
        let removed = s.delete_displayed(0).expect("index 0 shown");
        assert_eq!(removed.name().as_str(), "Bernice Yu");
        assert_eq!(s.len(), 2);
        assert!(s.delete_displayed(0).is_err(), "projection now empty");
    }

    #[test]
    fn test_replace_preserves_position() {
        let mut s = store();
        let target = s.persons()[1].clone();
        let updated = target.with_field(ContactField::Phone, "90725679").unwrap();
        s.replace(&target, updated.clone()).expect("identity present");
        assert_eq!(s.persons()[1], updated);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_replace_missing_identity_fails() {
        let mut s = store();
        let gone = person("Nobody Here");
        assert_eq!(
            s.replace(&gone, gone.clone()),
            Err(StoreError::PersonNotFound)
        );
    }

    #[test]
    fn test_displayed_at_out_of_range() {
        let s = store();
        assert!(s.displayed_at(2).is_ok());
        assert!(matches!(s.displayed_at(3), Err(StoreError::NoSuchIndex)));
    }
}
