// Seed data for an empty client database

use crate::person::{Address, Email, Name, Notes, Person, Phone, Tag};
use crate::records::{Asset, Liability, Policy};
use std::collections::HashSet;

/// Starter clients shown on first launch, before anything is imported.
pub fn sample_persons() -> Vec<Person> {
    vec![
        sample_person(
            "Alex Yeoh",
            "87438807",
            "alexyeoh@example.com",
            "Blk 30 Geylang Street 29, #06-40",
            &["friends"],
            "Likes bread",
            &["Diamond Policy;;;AIA;;;$10000;;;$200;;;$1000"],
            &["Mortgage debt;;;Debt;;;$2000;;;From DBS Bank"],
            &["HDB flat;;;Property;;;$500000;;;Jointly owned"],
        ),
        sample_person(
            "Bernice Yu",
            "99272758",
            "berniceyu@example.com",
            "Blk 30 Lorong 3 Serangoon Gardens, #07-18",
            &["colleagues", "friends"],
            "Has 2 children",
            &["Starter Term Plan;;;Prudential;;;$50000;;;$400;;;$800"],
            &[],
            &["Savings portfolio;;;Investment;;;$20000;;;Unit trusts"],
        ),
        sample_person(
            "Charlotte Oliveiro",
            "93210283",
            "charlotte@example.com",
            "Blk 11 Ang Mo Kio Street 74, #11-04",
            &["neighbours"],
            "",
            &[],
            &["Car loan;;;Loan;;;$30000;;;5 year tenure"],
            &[],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn sample_person(
    name: &str,
    phone: &str,
    email: &str,
    address: &str,
    tags: &[&str],
    notes: &str,
    policies: &[&str],
    liabilities: &[&str],
    assets: &[&str],
) -> Person {
    Person::new(
        Name::new(name).expect("sample name is valid"),
        Phone::new(phone).expect("sample phone is valid"),
        Email::new(email).expect("sample email is valid"),
        Address::new(address).expect("sample address is valid"),
        tags.iter()
            .map(|t| Tag::new(t).expect("sample tag is valid"))
            .collect(),
        Notes::new(notes),
        policies
            .iter()
            .map(|s| Policy::from_attribute_string(s).expect("sample policy is valid"))
            .collect::<HashSet<_>>(),
        liabilities
            .iter()
            .map(|s| Liability::from_attribute_string(s).expect("sample liability is valid"))
            .collect::<HashSet<_>>(),
        assets
            .iter()
            .map(|s| Asset::from_attribute_string(s).expect("sample asset is valid"))
            .collect::<HashSet<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_persons_are_valid_and_unique() {
        let persons = sample_persons();
        assert_eq!(persons.len(), 3);
        for (i, a) in persons.iter().enumerate() {
            for b in persons.iter().skip(i + 1) {
                assert!(!a.is_same_person(b), "sample names must be unique");
            }
        }
    }
}
