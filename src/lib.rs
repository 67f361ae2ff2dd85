// ClientBook - Core Library
// Exposes all modules for use in the TUI binary and tests

pub mod adapter;
pub mod commands;
pub mod grammar;
pub mod import;
pub mod money;
pub mod person;
pub mod records;
pub mod router;
pub mod sample;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use adapter::{AdapterError, PersonAdapter};
pub use commands::{
    Command, CommandError, CommandResult, Effect, Index, Session, Tab, ViewState,
};
pub use grammar::{grammar_for, CommandGrammar, ParseError};
pub use money::{Money, MoneyError};
pub use person::{Address, ContactField, Email, Name, Notes, Person, Phone, Tag};
pub use records::{
    canonical_order, remove_at, Asset, FieldError, Liability, Policy, RecordField,
    ATTRIBUTE_DELIMITER,
};
pub use router::{CommandRouter, RouterReply};
pub use store::{ClientStore, StoreError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
