// PersonAdapter - mediated edit access to one client's fields

use crate::person::{ContactField, Notes, Person};
use crate::records::{Asset, FieldError, Liability, Policy};
use crate::store::{ClientStore, StoreError};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The bound client left the store (deleted from another context).
    ClientMissing,
    /// A replacement value failed its field's validation.
    InvalidField(FieldError),
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterError::ClientMissing => {
                write!(f, "The client being edited is no longer in the client list.")
            }
            AdapterError::InvalidField(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AdapterError {}

impl From<FieldError> for AdapterError {
    fn from(e: FieldError) -> Self {
        AdapterError::InvalidField(e)
    }
}

/// Mediates all edits to one open client record.
///
/// The subject `Person` is immutable; every edit builds the replacement
/// person, commits it to the store as a single identity-keyed replace, and
/// only then updates the held snapshot. A failed edit leaves both the store
/// and the snapshot untouched.
#[derive(Debug, Clone)]
pub struct PersonAdapter {
    subject: Person,
}

impl PersonAdapter {
    pub fn new(subject: Person) -> Self {
        PersonAdapter { subject }
    }

    /// Current snapshot; fresh after any successful edit through this
    /// adapter.
    pub fn subject(&self) -> &Person {
        &self.subject
    }

    /// Replace one scalar contact field.
    pub fn edit_field(
        &mut self,
        store: &mut ClientStore,
        field: ContactField,
        value: &str,
    ) -> Result<(), AdapterError> {
        let next = self.subject.with_field(field, value)?;
        self.commit(store, next)
    }

    pub fn edit_notes(&mut self, store: &mut ClientStore, notes: Notes) -> Result<(), AdapterError> {
        let next = self.subject.with_notes(notes);
        self.commit(store, next)
    }

    pub fn edit_policies(
        &mut self,
        store: &mut ClientStore,
        policies: HashSet<Policy>,
    ) -> Result<(), AdapterError> {
        let next = self.subject.with_policies(policies);
        self.commit(store, next)
    }

    pub fn edit_liabilities(
        &mut self,
        store: &mut ClientStore,
        liabilities: HashSet<Liability>,
    ) -> Result<(), AdapterError> {
        let next = self.subject.with_liabilities(liabilities);
        self.commit(store, next)
    }

    pub fn edit_assets(
        &mut self,
        store: &mut ClientStore,
        assets: HashSet<Asset>,
    ) -> Result<(), AdapterError> {
        let next = self.subject.with_assets(assets);
        self.commit(store, next)
    }

    /// Atomic read-modify-replace keyed by the subject's identity.
    fn commit(&mut self, store: &mut ClientStore, next: Person) -> Result<(), AdapterError> {
        store
            .replace(&self.subject, next.clone())
            .map_err(|_: StoreError| AdapterError::ClientMissing)?;
        self.subject = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::tests::person;
    use pretty_assertions::assert_eq;

    fn store_with_subject() -> (ClientStore, PersonAdapter) {
        let mut store = ClientStore::new();
        store.add(person("Alex Yeoh")).unwrap();
        store.add(person("Bernice Yu")).unwrap();
        let adapter = PersonAdapter::new(store.persons()[0].clone());
        (store, adapter)
    }

    #[test]
    fn test_edit_field_commits_and_refreshes_subject() {
        let (mut store, mut adapter) = store_with_subject();
        adapter
            .edit_field(&mut store, ContactField::Name, "Allison Wang")
            .expect("valid edit");
        assert_eq!(adapter.subject().name().as_str(), "Allison Wang");
        assert_eq!(store.persons()[0].name().as_str(), "Allison Wang");
        assert_eq!(store.persons()[0], *adapter.subject());
    }

    #[test]
    fn test_edit_field_invalid_value_mutates_nothing() {
        let (mut store, mut adapter) = store_with_subject();
        let before = store.persons()[0].clone();
        let err = adapter
            .edit_field(&mut store, ContactField::Phone, "not a phone")
            .expect_err("invalid phone");
        assert!(matches!(err, AdapterError::InvalidField(_)));
        assert_eq!(store.persons()[0], before);
        assert_eq!(*adapter.subject(), before);
    }

    #[test]
    fn test_edit_policies_replaces_whole_collection() {
        let (mut store, mut adapter) = store_with_subject();
        let mut policies = std::collections::HashSet::new();
        policies.insert(
            crate::records::Policy::new("Diamond Policy", "AIA", "$10000", "$200", "$1000")
                .expect("valid policy"),
        );
        adapter
            .edit_policies(&mut store, policies.clone())
            .expect("valid edit");
        assert_eq!(*adapter.subject().policies(), policies);
        assert_eq!(*store.persons()[0].policies(), policies);
    }

    #[test]
    fn test_edit_after_subject_deleted_reports_client_missing() {
        let (mut store, mut adapter) = store_with_subject();
        store.delete_displayed(0).unwrap();
        let err = adapter
            .edit_field(&mut store, ContactField::Phone, "90725679")
            .expect_err("subject gone");
        assert_eq!(err, AdapterError::ClientMissing);
        assert_eq!(store.len(), 1, "remaining client untouched");
    }
}
