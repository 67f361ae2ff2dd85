// Command objects - one unit of user-requested work each

use crate::adapter::{AdapterError, PersonAdapter};
use crate::person::{ContactField, Notes, Person};
use crate::records::{canonical_order, remove_at, Asset, Liability, Policy, RecordField};
use crate::store::{ClientStore, StoreError};
use std::fmt;

// ============================================================================
// VIEW STATE
// ============================================================================

/// The tab in effect inside an open client view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Contact,
    Policies,
    Liabilities,
    Assets,
    Notes,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Contact,
        Tab::Policies,
        Tab::Liabilities,
        Tab::Assets,
        Tab::Notes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Contact => "contact",
            Tab::Policies => "policies",
            Tab::Liabilities => "liabilities",
            Tab::Assets => "assets",
            Tab::Notes => "notes",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Contact => "Contact",
            Tab::Policies => "Policies",
            Tab::Liabilities => "Liabilities",
            Tab::Assets => "Assets",
            Tab::Notes => "Notes",
        }
    }

    /// The record collection this tab edits, if it is a record tab.
    pub fn record_field(&self) -> Option<RecordField> {
        match self {
            Tab::Policies => Some(RecordField::Policies),
            Tab::Liabilities => Some(RecordField::Liabilities),
            Tab::Assets => Some(RecordField::Assets),
            Tab::Contact | Tab::Notes => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// Which grammar governs the next input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    ClientList,
    ClientView(Tab),
}

// ============================================================================
// INDEX
// ============================================================================

/// A user-facing 1-based ordinal, held 0-based internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(usize);

impl Index {
    /// `None` when the ordinal is zero (ordinals are positive).
    pub fn from_one_based(one_based: usize) -> Option<Index> {
        one_based.checked_sub(1).map(Index)
    }

    pub fn zero_based(&self) -> usize {
        self.0
    }

    pub fn one_based(&self) -> usize {
        self.0 + 1
    }
}

// ============================================================================
// SESSION, RESULT, ERRORS
// ============================================================================

/// The interaction state commands execute against: the shared store plus
/// the adapter bound to the currently open client view, if any.
#[derive(Debug, Default)]
pub struct Session {
    pub store: ClientStore,
    pub view: Option<PersonAdapter>,
}

impl Session {
    pub fn new(store: ClientStore) -> Self {
        Session { store, view: None }
    }
}

/// Follow-up effects a command asks the router/view layer to apply. The
/// command core never touches the presentation layer directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Switch the visible client-view tab.
    SwitchTab(Tab),
    /// Show the detail view for the newly bound client.
    ShowDetail,
    /// Return to the client list view.
    ShowList,
    /// Install the grammar for the given view state on the router.
    InstallGrammar(ViewState),
    /// Redraw the active tab after an edit.
    Refresh,
    /// Surface the help text.
    ShowHelp,
    /// Terminate the interactive session.
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub message: String,
    pub effects: Vec<Effect>,
}

impl CommandResult {
    pub fn message(message: impl Into<String>) -> Self {
        CommandResult {
            message: message.into(),
            effects: Vec::new(),
        }
    }

    pub fn with_effects(message: impl Into<String>, effects: Vec<Effect>) -> Self {
        CommandResult {
            message: message.into(),
            effects,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Store(StoreError),
    Adapter(AdapterError),
    /// Ordinal outside the target collection's canonical range.
    NoSuchIndex,
    /// A client-view command executed with no client bound.
    NoClientOpen,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Store(e) => write!(f, "{}", e),
            CommandError::Adapter(e) => write!(f, "{}", e),
            CommandError::NoSuchIndex => write!(f, "No such index found."),
            CommandError::NoClientOpen => write!(f, "No client record is open."),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<StoreError> for CommandError {
    fn from(e: StoreError) -> Self {
        CommandError::Store(e)
    }
}

impl From<AdapterError> for CommandError {
    fn from(e: AdapterError) -> Self {
        CommandError::Adapter(e)
    }
}

/// A unit of work produced by a grammar; execution must be side-effect-free
/// on failure.
pub trait Command {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError>;
}

fn bound_view<'a>(
    view: &'a mut Option<PersonAdapter>,
) -> Result<&'a mut PersonAdapter, CommandError> {
    view.as_mut().ok_or(CommandError::NoClientOpen)
}

// ============================================================================
// CLIENT LIST COMMANDS
// ============================================================================

/// `add n/NAME p/PHONE e/EMAIL a/ADDRESS [t/TAG]...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    pub person: Person,
}

impl AddCommand {
    pub const WORD: &'static str = "add";
    pub const USAGE: &'static str = "add: Adds a client to the client list.\n\
        Parameters: n/NAME p/PHONE e/EMAIL a/ADDRESS [t/TAG]...\n\
        Example: add n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2 t/friends";
}

impl Command for AddCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        session.store.add(self.person.clone())?;
        Ok(CommandResult::message(format!(
            "New client added: {}",
            self.person
        )))
    }
}

/// `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCommand;

impl ListCommand {
    pub const WORD: &'static str = "list";
}

impl Command for ListCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        session.store.clear_filter();
        Ok(CommandResult::message("Listed all clients"))
    }
}

/// `find KEYWORD [MORE_KEYWORDS]...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    pub keywords: Vec<String>,
}

impl FindCommand {
    pub const WORD: &'static str = "find";
    pub const USAGE: &'static str = "find: Finds all clients whose names contain any of the \
        given keywords (case-insensitive).\n\
        Parameters: KEYWORD [MORE_KEYWORDS]...\n\
        Example: find alice bob charlie";
}

impl Command for FindCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        session.store.set_filter(self.keywords.clone());
        let shown = session.store.displayed().len();
        Ok(CommandResult::message(format!("{} clients listed!", shown)))
    }
}

/// `delete INDEX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommand {
    pub index: Index,
}

impl DeleteCommand {
    pub const WORD: &'static str = "delete";
    pub const USAGE: &'static str = "delete: Deletes the client at the given list index.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: delete 1";
}

impl Command for DeleteCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        let removed = session.store.delete_displayed(self.index.zero_based())?;
        Ok(CommandResult::message(format!("Deleted Client: {}", removed)))
    }
}

/// `view INDEX` - open a client record and bind the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewCommand {
    pub index: Index,
}

impl ViewCommand {
    pub const WORD: &'static str = "view";
    pub const USAGE: &'static str = "view: Views a client record with more detail.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: view 1";
}

impl Command for ViewCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        let person = session
            .store
            .displayed_at(self.index.zero_based())?
            .clone();
        let message = format!("Viewing Client: {}", person.name().as_str());
        session.view = Some(PersonAdapter::new(person));
        Ok(CommandResult::with_effects(
            message,
            vec![
                Effect::ShowDetail,
                Effect::SwitchTab(Tab::Contact),
                Effect::InstallGrammar(ViewState::ClientView(Tab::Contact)),
            ],
        ))
    }
}

/// `clear`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearCommand;

impl ClearCommand {
    pub const WORD: &'static str = "clear";
}

impl Command for ClearCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        session.store.clear();
        Ok(CommandResult::message("Client list has been cleared!"))
    }
}

// ============================================================================
// SHARED COMMANDS
// ============================================================================

/// `help` - the message is the help text of the grammar that parsed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpCommand {
    pub help_text: String,
}

impl HelpCommand {
    pub const WORD: &'static str = "help";
}

impl Command for HelpCommand {
    fn execute(&self, _session: &mut Session) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::with_effects(
            self.help_text.clone(),
            vec![Effect::ShowHelp],
        ))
    }
}

/// `exit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCommand;

impl ExitCommand {
    pub const WORD: &'static str = "exit";
}

impl Command for ExitCommand {
    fn execute(&self, _session: &mut Session) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::with_effects(
            "Exiting ClientBook as requested ...",
            vec![Effect::Exit],
        ))
    }
}

/// `home` - close the client view and return to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeCommand;

impl HomeCommand {
    pub const WORD: &'static str = "home";
}

impl Command for HomeCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        session.view = None;
        Ok(CommandResult::with_effects(
            "Returning to the client list.",
            vec![
                Effect::ShowList,
                Effect::InstallGrammar(ViewState::ClientList),
            ],
        ))
    }
}

/// `tab NAME` - switch the active tab and its grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchTabCommand {
    pub tab: Tab,
}

impl SwitchTabCommand {
    pub const WORD: &'static str = "tab";
    pub const USAGE: &'static str = "tab: Switches the active tab of the open client record.\n\
        Parameters: TAB (contact, policies, liabilities, assets, notes)\n\
        Example: tab policies";
}

impl Command for SwitchTabCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        bound_view(&mut session.view)?;
        Ok(CommandResult::with_effects(
            "Switched tab",
            vec![
                Effect::SwitchTab(self.tab),
                Effect::InstallGrammar(ViewState::ClientView(self.tab)),
            ],
        ))
    }
}

// ============================================================================
// CONTACT TAB
// ============================================================================

/// `edit <prefix>/VALUE` on the contact tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditContactCommand {
    pub field: ContactField,
    pub value: String,
}

impl EditContactCommand {
    pub const WORD: &'static str = "edit";
    pub const USAGE: &'static str = "edit: Edits one contact field of the open client record.\n\
        Parameters: exactly one of n/NAME p/PHONE e/EMAIL a/ADDRESS\n\
        Example: edit n/Allison Wang";
}

impl Command for EditContactCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        let Session { store, view } = session;
        let adapter = bound_view(view)?;
        adapter.edit_field(store, self.field, &self.value)?;
        Ok(CommandResult::with_effects(
            format!("Edited {}: {}", self.field.name(), self.value),
            vec![Effect::Refresh],
        ))
    }
}

// ============================================================================
// RECORD TABS
// ============================================================================

/// A parsed record value, tagged with the collection it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    Policy(Policy),
    Liability(Liability),
    Asset(Asset),
}

impl RecordValue {
    pub fn field(&self) -> RecordField {
        match self {
            RecordValue::Policy(_) => RecordField::Policies,
            RecordValue::Liability(_) => RecordField::Liabilities,
            RecordValue::Asset(_) => RecordField::Assets,
        }
    }
}

/// `append <attrs>` on a record tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendCommand {
    pub record: RecordValue,
}

impl AppendCommand {
    pub const WORD: &'static str = "append";
}

impl Command for AppendCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        let Session { store, view } = session;
        let adapter = bound_view(view)?;
        match &self.record {
            RecordValue::Policy(policy) => {
                let mut set = adapter.subject().policies().clone();
                set.insert(policy.clone());
                adapter.edit_policies(store, set)?;
            }
            RecordValue::Liability(liability) => {
                let mut set = adapter.subject().liabilities().clone();
                set.insert(liability.clone());
                adapter.edit_liabilities(store, set)?;
            }
            RecordValue::Asset(asset) => {
                let mut set = adapter.subject().assets().clone();
                set.insert(asset.clone());
                adapter.edit_assets(store, set)?;
            }
        }
        Ok(CommandResult::with_effects(
            format!(
                "Added {} for {}",
                self.record.field().singular(),
                adapter.subject().name().as_str()
            ),
            vec![Effect::Refresh],
        ))
    }
}

/// `remove INDEX` on a record tab; the index resolves against the
/// collection's canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveCommand {
    pub field: RecordField,
    pub index: Index,
}

impl RemoveCommand {
    pub const WORD: &'static str = "remove";
    pub const USAGE: &'static str = "remove: Removes the record at the given table index.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: remove 1";
}

impl Command for RemoveCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        let Session { store, view } = session;
        let adapter = bound_view(view)?;
        let index = self.index.zero_based();
        match self.field {
            RecordField::Policies => {
                let reduced = remove_at(adapter.subject().policies(), index)
                    .map_err(|_| CommandError::NoSuchIndex)?;
                adapter.edit_policies(store, reduced)?;
            }
            RecordField::Liabilities => {
                let reduced = remove_at(adapter.subject().liabilities(), index)
                    .map_err(|_| CommandError::NoSuchIndex)?;
                adapter.edit_liabilities(store, reduced)?;
            }
            RecordField::Assets => {
                let reduced = remove_at(adapter.subject().assets(), index)
                    .map_err(|_| CommandError::NoSuchIndex)?;
                adapter.edit_assets(store, reduced)?;
            }
        }
        Ok(CommandResult::with_effects(
            format!("Removed {} {}", self.field.singular(), self.index.one_based()),
            vec![Effect::Refresh],
        ))
    }
}

/// `edit INDEX <attrs>` on a record tab: replace the record at the canonical
/// index with one built from the full attribute set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecordCommand {
    pub index: Index,
    pub record: RecordValue,
}

impl EditRecordCommand {
    pub const WORD: &'static str = "edit";
}

impl Command for EditRecordCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        let Session { store, view } = session;
        let adapter = bound_view(view)?;
        let index = self.index.zero_based();
        match &self.record {
            RecordValue::Policy(policy) => {
                let mut set = remove_at(adapter.subject().policies(), index)
                    .map_err(|_| CommandError::NoSuchIndex)?;
                set.insert(policy.clone());
                adapter.edit_policies(store, set)?;
            }
            RecordValue::Liability(liability) => {
                let mut set = remove_at(adapter.subject().liabilities(), index)
                    .map_err(|_| CommandError::NoSuchIndex)?;
                set.insert(liability.clone());
                adapter.edit_liabilities(store, set)?;
            }
            RecordValue::Asset(asset) => {
                let mut set = remove_at(adapter.subject().assets(), index)
                    .map_err(|_| CommandError::NoSuchIndex)?;
                set.insert(asset.clone());
                adapter.edit_assets(store, set)?;
            }
        }
        Ok(CommandResult::with_effects(
            format!("Edited {} {}", self.record.field().singular(), self.index.one_based()),
            vec![Effect::Refresh],
        ))
    }
}

// ============================================================================
// NOTES TAB
// ============================================================================

/// `edit <text>` on the notes tab: replace the notes wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditNotesCommand {
    pub text: String,
}

impl EditNotesCommand {
    pub const WORD: &'static str = "edit";
    pub const USAGE: &'static str = "edit: Replaces the client's notes.\n\
        Parameters: TEXT\n\
        Example: edit Prefers email contact";
}

impl Command for EditNotesCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        let Session { store, view } = session;
        let adapter = bound_view(view)?;
        adapter.edit_notes(store, Notes::new(&self.text))?;
        Ok(CommandResult::with_effects(
            "Updated notes.",
            vec![Effect::Refresh],
        ))
    }
}

/// `append <text>` on the notes tab: add a line to the notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendNotesCommand {
    pub text: String,
}

impl AppendNotesCommand {
    pub const WORD: &'static str = "append";
    pub const USAGE: &'static str = "append: Appends a line to the client's notes.\n\
        Parameters: TEXT\n\
        Example: append Met at annual review 2024";
}

impl Command for AppendNotesCommand {
    fn execute(&self, session: &mut Session) -> Result<CommandResult, CommandError> {
        let Session { store, view } = session;
        let adapter = bound_view(view)?;
        let appended = adapter.subject().notes().with_appended(&self.text);
        adapter.edit_notes(store, appended)?;
        Ok(CommandResult::with_effects(
            "Appended to notes.",
            vec![Effect::Refresh],
        ))
    }
}

// Keep the canonical-order helper visible to the UI layer through this
// module as well; record tables render exactly this ordering.
pub fn ordered_policies(person: &Person) -> Vec<Policy> {
    canonical_order(person.policies())
}

pub fn ordered_liabilities(person: &Person) -> Vec<Liability> {
    canonical_order(person.liabilities())
}

pub fn ordered_assets(person: &Person) -> Vec<Asset> {
    canonical_order(person.assets())
}
