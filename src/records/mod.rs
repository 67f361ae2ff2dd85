// Financial record value types - one file per record kind

pub mod asset;
pub mod liability;
pub mod policy;

pub use asset::Asset;
pub use liability::Liability;
pub use policy::Policy;

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// Delimiter joining record attributes when a record is round-tripped as a
/// single string (sample data, CSV import cells, storage columns).
pub const ATTRIBUTE_DELIMITER: &str = ";;;";

// ============================================================================
// FIELD VALIDATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Validate one textual record attribute.
///
/// Attributes must be non-blank single-line text; the raw value is returned
/// unchanged on success.
pub fn validate_field(field: &str, value: &str) -> Result<String, FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, "must not be blank"));
    }
    if value.contains('\n') || value.contains('\r') {
        return Err(FieldError::new(field, "must not contain line breaks"));
    }
    Ok(value.to_string())
}

/// Which of a client's three record collections an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Policies,
    Liabilities,
    Assets,
}

impl RecordField {
    pub fn name(&self) -> &'static str {
        match self {
            RecordField::Policies => "policies",
            RecordField::Liabilities => "liabilities",
            RecordField::Assets => "assets",
        }
    }

    /// Singular noun for user-facing messages.
    pub fn singular(&self) -> &'static str {
        match self {
            RecordField::Policies => "policy",
            RecordField::Liabilities => "liability",
            RecordField::Assets => "asset",
        }
    }
}

// ============================================================================
// ORDERED-SET EDIT SEMANTICS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of range for collection of size {}",
            self.index + 1,
            self.len
        )
    }
}

impl std::error::Error for IndexOutOfRange {}

/// Materialize the canonical order of a record set: ascending lexicographic
/// order of each record's full string form. Recomputed on every call; the
/// order is never stored anywhere.
pub fn canonical_order<T>(set: &HashSet<T>) -> Vec<T>
where
    T: Clone + fmt::Display,
{
    let mut ordered: Vec<T> = set.iter().cloned().collect();
    ordered.sort_by_key(|record| record.to_string());
    ordered
}

/// Remove the element at the given 0-based canonical position, returning the
/// reduced set. The input set is untouched when the index is out of range.
pub fn remove_at<T>(set: &HashSet<T>, index: usize) -> Result<HashSet<T>, IndexOutOfRange>
where
    T: Clone + Eq + Hash + fmt::Display,
{
    let mut ordered = canonical_order(set);
    if index >= ordered.len() {
        return Err(IndexOutOfRange {
            index,
            len: ordered.len(),
        });
    }
    ordered.remove(index);
    Ok(ordered.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_set() -> HashSet<Liability> {
        let mut set = HashSet::new();
        for name in ["Car loan", "Mortgage debt", "Bridging loan"] {
            set.insert(
                Liability::new(name, "Debt", "$2000", "From DBS Bank").expect("valid liability"),
            );
        }
        set
    }

    #[test]
    fn test_validate_field_accepts_plain_text() {
        assert_eq!(
            validate_field("remarks", "23 year loan").expect("valid"),
            "23 year loan"
        );
    }

    #[test]
    fn test_validate_field_rejects_blank_and_newline() {
        assert!(validate_field("name", "").is_err());
        assert!(validate_field("name", "   ").is_err());
        assert!(validate_field("name", "john \n doe").is_err());
        assert!(validate_field("name", "john \r doe").is_err());
    }

    #[test]
    fn test_canonical_order_is_independent_of_insertion_order() {
        let set = sample_set();
        let ordered = canonical_order(&set);
        let names: Vec<&str> = ordered.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["Bridging loan", "Car loan", "Mortgage debt"]);
    }

    #[test]
    fn test_remove_at_every_valid_index() {
        let set = sample_set();
        let n = set.len();
        for i in 0..n {
            let before = canonical_order(&set);
            let reduced = remove_at(&set, i).expect("index in range");
            assert_eq!(reduced.len(), n - 1);
            assert!(!reduced.contains(&before[i]), "element {} should be gone", i);
            for (j, element) in before.iter().enumerate() {
                if j != i {
                    assert!(reduced.contains(element));
                }
            }
        }
    }

    #[test]
    fn test_remove_at_out_of_range_leaves_set_unchanged() {
        let set = sample_set();
        let err = remove_at(&set, set.len()).expect_err("out of range");
        assert_eq!(err.len, set.len());
        assert_eq!(set, sample_set());
    }

    #[test]
    fn test_remove_at_on_empty_set() {
        let set: HashSet<Liability> = HashSet::new();
        assert!(remove_at(&set, 0).is_err());
    }
}
