// Tab-scoped command grammars - one parser strategy per view state

use crate::commands::{
    AddCommand, AppendCommand, AppendNotesCommand, ClearCommand, Command, DeleteCommand,
    EditContactCommand, EditNotesCommand, EditRecordCommand, ExitCommand, FindCommand,
    HelpCommand, HomeCommand, Index, ListCommand, RecordValue, RemoveCommand, SwitchTabCommand,
    Tab, ViewCommand, ViewState,
};
use crate::person::{Address, ContactField, Email, Name, Person, Phone, Tag};
use crate::records::{Asset, FieldError, Liability, Policy, RecordField};
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;

// ============================================================================
// PARSE ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Verb not recognized in the current view state.
    UnknownCommand,
    /// Recognized verb with malformed arguments; names the expected grammar.
    InvalidFormat { usage: String },
    /// Bare keyword followed by argument text.
    UnexpectedArguments,
    /// Well-formed syntax carrying a semantically invalid value.
    InvalidValue(String),
    /// Ordinal literal that is not a positive integer.
    InvalidIndex,
}

impl ParseError {
    fn invalid_format(usage: &str) -> Self {
        ParseError::InvalidFormat {
            usage: usage.to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand => write!(f, "Unknown command"),
            ParseError::InvalidFormat { usage } => {
                write!(f, "Invalid command format!\n{}", usage)
            }
            ParseError::UnexpectedArguments => write!(
                f,
                "This command does not take arguments. Use the help command to view command usage."
            ),
            ParseError::InvalidValue(message) => write!(f, "{}", message),
            ParseError::InvalidIndex => {
                write!(f, "Index is not a non-zero unsigned integer.")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<FieldError> for ParseError {
    fn from(e: FieldError) -> Self {
        ParseError::InvalidValue(e.to_string())
    }
}

// ============================================================================
// TOKEN HELPERS
// ============================================================================

/// Split a line into its command word and the remaining argument text.
fn split_word(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    }
}

/// A bare keyword takes no arguments.
fn expect_no_arguments(rest: &str) -> Result<(), ParseError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(ParseError::UnexpectedArguments)
    }
}

fn parse_index(token: &str) -> Result<Index, ParseError> {
    let one_based: usize = token.parse().map_err(|_| ParseError::InvalidIndex)?;
    Index::from_one_based(one_based).ok_or(ParseError::InvalidIndex)
}

/// Prefix-tagged argument tokens.
///
/// Arguments are whitespace-separated words; a word starting with a known
/// prefix opens that prefix's slot and subsequent words extend its value.
/// Words before the first prefix form the preamble.
struct PrefixedArgs {
    preamble: String,
    values: HashMap<&'static str, Vec<String>>,
}

impl PrefixedArgs {
    fn tokenize(args: &str, prefixes: &[&'static str]) -> Self {
        // Longest prefix first so `iv/` is never read as `i/`.
        let mut by_length: Vec<&'static str> = prefixes.to_vec();
        by_length.sort_by_key(|p| std::cmp::Reverse(p.len()));

        let mut preamble_parts: Vec<&str> = Vec::new();
        let mut values: HashMap<&'static str, Vec<String>> = HashMap::new();
        let mut current: Option<(&'static str, Vec<&str>)> = None;

        for word in args.split_whitespace() {
            let opened = by_length
                .iter()
                .find(|p| word.starts_with(**p))
                .map(|p| (*p, &word[p.len()..]));
            match opened {
                Some((prefix, first)) => {
                    if let Some((open_prefix, parts)) = current.take() {
                        values.entry(open_prefix).or_default().push(parts.join(" "));
                    }
                    current = Some((prefix, vec![first]));
                }
                None => match current.as_mut() {
                    Some((_, parts)) => parts.push(word),
                    None => preamble_parts.push(word),
                },
            }
        }
        if let Some((open_prefix, parts)) = current.take() {
            values.entry(open_prefix).or_default().push(parts.join(" "));
        }

        PrefixedArgs {
            preamble: preamble_parts.join(" "),
            values,
        }
    }

    fn expect_empty_preamble(&self, usage: &str) -> Result<(), ParseError> {
        if self.preamble.is_empty() {
            Ok(())
        } else {
            Err(ParseError::invalid_format(usage))
        }
    }

    /// The single value of a prefix that must appear exactly once.
    fn required(&self, prefix: &'static str, usage: &str) -> Result<&str, ParseError> {
        match self.values.get(prefix).map(Vec::as_slice) {
            Some([value]) => Ok(value),
            _ => Err(ParseError::invalid_format(usage)),
        }
    }

    fn repeated(&self, prefix: &'static str) -> &[String] {
        self.values.get(prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Count of slots opened by prefixes in `prefixes`.
    fn occupied(&self, prefixes: &[&'static str]) -> usize {
        prefixes
            .iter()
            .map(|p| self.values.get(p).map(Vec::len).unwrap_or(0))
            .sum()
    }
}

// ============================================================================
// GRAMMAR STRATEGY
// ============================================================================

/// One parser strategy: translates a raw input line into a command under the
/// vocabulary of a single view state. Pure with respect to the store.
pub trait CommandGrammar {
    /// The view state whose vocabulary this grammar implements.
    fn view_state(&self) -> ViewState;

    fn parse(&self, line: &str) -> Result<Box<dyn Command>, ParseError>;

    /// Help text listing this state's vocabulary.
    fn help_text(&self) -> String;
}

/// Strategy factory: the grammar governing a view state.
pub fn grammar_for(state: ViewState) -> Box<dyn CommandGrammar> {
    match state {
        ViewState::ClientList => Box::new(ClientListGrammar),
        ViewState::ClientView(Tab::Contact) => Box::new(ContactGrammar),
        ViewState::ClientView(Tab::Policies) => Box::new(PoliciesGrammar),
        ViewState::ClientView(Tab::Liabilities) => Box::new(LiabilitiesGrammar),
        ViewState::ClientView(Tab::Assets) => Box::new(AssetsGrammar),
        ViewState::ClientView(Tab::Notes) => Box::new(NotesGrammar),
    }
}

const EMPTY_INPUT_HINT: &str = "Enter a command, or use the help command to view command usage.";

/// Baseline vocabulary shared by every client-view tab.
fn parse_client_view_baseline(
    word: &str,
    rest: &str,
    help_text: &str,
) -> Option<Result<Box<dyn Command>, ParseError>> {
    match word {
        HelpCommand::WORD => Some(expect_no_arguments(rest).map(|_| {
            Box::new(HelpCommand {
                help_text: help_text.to_string(),
            }) as Box<dyn Command>
        })),
        ExitCommand::WORD => {
            Some(expect_no_arguments(rest).map(|_| Box::new(ExitCommand) as Box<dyn Command>))
        }
        HomeCommand::WORD => {
            Some(expect_no_arguments(rest).map(|_| Box::new(HomeCommand) as Box<dyn Command>))
        }
        SwitchTabCommand::WORD => Some(parse_switch_tab(rest)),
        _ => None,
    }
}

fn parse_switch_tab(rest: &str) -> Result<Box<dyn Command>, ParseError> {
    match Tab::from_name(rest) {
        Some(tab) => Ok(Box::new(SwitchTabCommand { tab })),
        None => Err(ParseError::invalid_format(SwitchTabCommand::USAGE)),
    }
}

// ============================================================================
// CLIENT LIST GRAMMAR
// ============================================================================

pub struct ClientListGrammar;

const ADD_PREFIXES: [&str; 5] = ["n/", "p/", "e/", "a/", "t/"];

impl ClientListGrammar {
    fn parse_add(args: &str) -> Result<Box<dyn Command>, ParseError> {
        let tokens = PrefixedArgs::tokenize(args, &ADD_PREFIXES);
        tokens.expect_empty_preamble(AddCommand::USAGE)?;

        let name = Name::new(tokens.required("n/", AddCommand::USAGE)?)?;
        let phone = Phone::new(tokens.required("p/", AddCommand::USAGE)?)?;
        let email = Email::new(tokens.required("e/", AddCommand::USAGE)?)?;
        let address = Address::new(tokens.required("a/", AddCommand::USAGE)?)?;
        let mut tags = HashSet::new();
        for raw in tokens.repeated("t/") {
            tags.insert(Tag::new(raw)?);
        }

        let person = Person::new(
            name,
            phone,
            email,
            address,
            tags,
            Default::default(),
            HashSet::new(),
            HashSet::new(),
            HashSet::new(),
        );
        Ok(Box::new(AddCommand { person }))
    }
}

impl CommandGrammar for ClientListGrammar {
    fn view_state(&self) -> ViewState {
        ViewState::ClientList
    }

    fn parse(&self, line: &str) -> Result<Box<dyn Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::invalid_format(EMPTY_INPUT_HINT));
        }
        let (word, rest) = split_word(line);
        match word {
            AddCommand::WORD => Self::parse_add(rest),
            ListCommand::WORD => {
                expect_no_arguments(rest).map(|_| Box::new(ListCommand) as Box<dyn Command>)
            }
            ClearCommand::WORD => {
                expect_no_arguments(rest).map(|_| Box::new(ClearCommand) as Box<dyn Command>)
            }
            HelpCommand::WORD => expect_no_arguments(rest).map(|_| {
                Box::new(HelpCommand {
                    help_text: self.help_text(),
                }) as Box<dyn Command>
            }),
            ExitCommand::WORD => {
                expect_no_arguments(rest).map(|_| Box::new(ExitCommand) as Box<dyn Command>)
            }
            FindCommand::WORD => {
                if rest.is_empty() {
                    return Err(ParseError::invalid_format(FindCommand::USAGE));
                }
                let keywords = rest.split_whitespace().map(str::to_string).collect();
                Ok(Box::new(FindCommand { keywords }))
            }
            DeleteCommand::WORD => {
                if rest.is_empty() {
                    return Err(ParseError::invalid_format(DeleteCommand::USAGE));
                }
                Ok(Box::new(DeleteCommand {
                    index: parse_index(rest)?,
                }))
            }
            ViewCommand::WORD => {
                if rest.is_empty() {
                    return Err(ParseError::invalid_format(ViewCommand::USAGE));
                }
                Ok(Box::new(ViewCommand {
                    index: parse_index(rest)?,
                }))
            }
            _ => Err(ParseError::UnknownCommand),
        }
    }

    fn help_text(&self) -> String {
        [
            "Client list commands:",
            "  add n/NAME p/PHONE e/EMAIL a/ADDRESS [t/TAG]...",
            "  list",
            "  find KEYWORD [MORE_KEYWORDS]...",
            "  view INDEX",
            "  delete INDEX",
            "  clear",
            "  help",
            "  exit",
        ]
        .join("\n")
    }
}

// ============================================================================
// CONTACT TAB GRAMMAR
// ============================================================================

pub struct ContactGrammar;

const CONTACT_PREFIXES: [&str; 4] = ["n/", "p/", "e/", "a/"];

impl ContactGrammar {
    fn parse_edit(args: &str) -> Result<Box<dyn Command>, ParseError> {
        let tokens = PrefixedArgs::tokenize(args, &CONTACT_PREFIXES);
        tokens.expect_empty_preamble(EditContactCommand::USAGE)?;
        if tokens.occupied(&CONTACT_PREFIXES) != 1 {
            return Err(ParseError::invalid_format(EditContactCommand::USAGE));
        }

        for (prefix, field) in [
            ("n/", ContactField::Name),
            ("p/", ContactField::Phone),
            ("e/", ContactField::Email),
            ("a/", ContactField::Address),
        ] {
            if let Some([value]) = tokens.values.get(prefix).map(Vec::as_slice) {
                return Ok(Box::new(EditContactCommand {
                    field,
                    value: value.clone(),
                }));
            }
        }
        Err(ParseError::invalid_format(EditContactCommand::USAGE))
    }
}

impl CommandGrammar for ContactGrammar {
    fn view_state(&self) -> ViewState {
        ViewState::ClientView(Tab::Contact)
    }

    fn parse(&self, line: &str) -> Result<Box<dyn Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::invalid_format(EMPTY_INPUT_HINT));
        }
        let (word, rest) = split_word(line);
        if let Some(parsed) = parse_client_view_baseline(word, rest, &self.help_text()) {
            return parsed;
        }
        match word {
            EditContactCommand::WORD => Self::parse_edit(rest),
            _ => Err(ParseError::UnknownCommand),
        }
    }

    fn help_text(&self) -> String {
        [
            "Contact tab commands:",
            "  edit n/NAME | p/PHONE | e/EMAIL | a/ADDRESS (one field per command)",
            "  tab TAB (contact, policies, liabilities, assets, notes)",
            "  home",
            "  help",
            "  exit",
        ]
        .join("\n")
    }
}

// ============================================================================
// RECORD TAB GRAMMARS
// ============================================================================

const POLICY_PREFIXES: [&str; 5] = ["n/", "i/", "iv/", "pr/", "c/"];
const LIABILITY_PREFIXES: [&str; 4] = ["n/", "ty/", "v/", "r/"];

const POLICY_APPEND_USAGE: &str = "append: Adds a policy to the open client record.\n\
    Parameters: n/NAME i/INSURER iv/INSURED_VALUE pr/YEARLY_PREMIUM c/COMMISSION\n\
    Example: append n/Diamond Policy i/AIA iv/$10000 pr/$200 c/$1000";
const POLICY_EDIT_USAGE: &str = "edit: Replaces the policy at the given table index.\n\
    Parameters: INDEX n/NAME i/INSURER iv/INSURED_VALUE pr/YEARLY_PREMIUM c/COMMISSION\n\
    Example: edit 1 n/Diamond Policy i/AIA iv/$12000 pr/$200 c/$1000";
const LIABILITY_APPEND_USAGE: &str = "append: Adds a liability to the open client record.\n\
    Parameters: n/NAME ty/TYPE v/VALUE r/REMARKS\n\
    Example: append n/Property debt ty/debt v/$100000 r/10 percent annual interest";
const LIABILITY_EDIT_USAGE: &str = "edit: Replaces the liability at the given table index.\n\
    Parameters: INDEX n/NAME ty/TYPE v/VALUE r/REMARKS\n\
    Example: edit 1 n/Property debt ty/debt v/$90000 r/Partially repaid";
const ASSET_APPEND_USAGE: &str = "append: Adds an asset to the open client record.\n\
    Parameters: n/NAME ty/TYPE v/VALUE r/REMARKS\n\
    Example: append n/HDB flat ty/property v/$500000 r/Jointly owned";
const ASSET_EDIT_USAGE: &str = "edit: Replaces the asset at the given table index.\n\
    Parameters: INDEX n/NAME ty/TYPE v/VALUE r/REMARKS\n\
    Example: edit 1 n/HDB flat ty/property v/$550000 r/Revalued";

fn parse_policy_attrs(args: &str, usage: &str) -> Result<Policy, ParseError> {
    let tokens = PrefixedArgs::tokenize(args, &POLICY_PREFIXES);
    tokens.expect_empty_preamble(usage)?;
    let policy = Policy::new(
        tokens.required("n/", usage)?,
        tokens.required("i/", usage)?,
        tokens.required("iv/", usage)?,
        tokens.required("pr/", usage)?,
        tokens.required("c/", usage)?,
    )?;
    Ok(policy)
}

fn parse_liability_attrs(args: &str, usage: &str) -> Result<Liability, ParseError> {
    let tokens = PrefixedArgs::tokenize(args, &LIABILITY_PREFIXES);
    tokens.expect_empty_preamble(usage)?;
    let liability = Liability::new(
        tokens.required("n/", usage)?,
        tokens.required("ty/", usage)?,
        tokens.required("v/", usage)?,
        tokens.required("r/", usage)?,
    )?;
    Ok(liability)
}

fn parse_asset_attrs(args: &str, usage: &str) -> Result<Asset, ParseError> {
    let tokens = PrefixedArgs::tokenize(args, &LIABILITY_PREFIXES);
    tokens.expect_empty_preamble(usage)?;
    let asset = Asset::new(
        tokens.required("n/", usage)?,
        tokens.required("ty/", usage)?,
        tokens.required("v/", usage)?,
        tokens.required("r/", usage)?,
    )?;
    Ok(asset)
}

/// `edit INDEX <attrs>`: the ordinal comes before the first prefix.
fn split_leading_index<'a>(args: &'a str, usage: &str) -> Result<(Index, &'a str), ParseError> {
    let (token, rest) = split_word(args);
    if token.is_empty() {
        return Err(ParseError::invalid_format(usage));
    }
    Ok((parse_index(token)?, rest))
}

fn parse_record_tab(
    field: RecordField,
    help_text: &str,
    line: &str,
    parse_append: impl Fn(&str) -> Result<RecordValue, ParseError>,
    parse_edit: impl Fn(&str) -> Result<(Index, RecordValue), ParseError>,
) -> Result<Box<dyn Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::invalid_format(EMPTY_INPUT_HINT));
    }
    let (word, rest) = split_word(line);
    if let Some(parsed) = parse_client_view_baseline(word, rest, help_text) {
        return parsed;
    }
    match word {
        AppendCommand::WORD => {
            let record = parse_append(rest)?;
            Ok(Box::new(AppendCommand { record }))
        }
        RemoveCommand::WORD => {
            if rest.is_empty() {
                return Err(ParseError::invalid_format(RemoveCommand::USAGE));
            }
            Ok(Box::new(RemoveCommand {
                field,
                index: parse_index(rest)?,
            }))
        }
        EditRecordCommand::WORD => {
            let (index, record) = parse_edit(rest)?;
            Ok(Box::new(EditRecordCommand { index, record }))
        }
        _ => Err(ParseError::UnknownCommand),
    }
}

fn record_tab_help(tab: Tab, append_usage: &str) -> String {
    let append_line = append_usage
        .lines()
        .nth(1)
        .map(|params| params.trim().replacen("Parameters:", "append", 1))
        .unwrap_or_else(|| "append <attributes>".to_string());
    [
        format!("{} tab commands:", tab.title()),
        format!("  {}", append_line),
        "  remove INDEX".to_string(),
        format!("  edit INDEX {}", append_line.trim_start_matches("append ")),
        "  tab TAB (contact, policies, liabilities, assets, notes)".to_string(),
        "  home".to_string(),
        "  help".to_string(),
        "  exit".to_string(),
    ]
    .join("\n")
}

pub struct PoliciesGrammar;

impl CommandGrammar for PoliciesGrammar {
    fn view_state(&self) -> ViewState {
        ViewState::ClientView(Tab::Policies)
    }

    fn parse(&self, line: &str) -> Result<Box<dyn Command>, ParseError> {
        parse_record_tab(
            RecordField::Policies,
            &self.help_text(),
            line,
            |args| parse_policy_attrs(args, POLICY_APPEND_USAGE).map(RecordValue::Policy),
            |args| {
                let (index, rest) = split_leading_index(args, POLICY_EDIT_USAGE)?;
                let policy = parse_policy_attrs(rest, POLICY_EDIT_USAGE)?;
                Ok((index, RecordValue::Policy(policy)))
            },
        )
    }

    fn help_text(&self) -> String {
        record_tab_help(Tab::Policies, POLICY_APPEND_USAGE)
    }
}

pub struct LiabilitiesGrammar;

impl CommandGrammar for LiabilitiesGrammar {
    fn view_state(&self) -> ViewState {
        ViewState::ClientView(Tab::Liabilities)
    }

    fn parse(&self, line: &str) -> Result<Box<dyn Command>, ParseError> {
        parse_record_tab(
            RecordField::Liabilities,
            &self.help_text(),
            line,
            |args| {
                parse_liability_attrs(args, LIABILITY_APPEND_USAGE).map(RecordValue::Liability)
            },
            |args| {
                let (index, rest) = split_leading_index(args, LIABILITY_EDIT_USAGE)?;
                let liability = parse_liability_attrs(rest, LIABILITY_EDIT_USAGE)?;
                Ok((index, RecordValue::Liability(liability)))
            },
        )
    }

    fn help_text(&self) -> String {
        record_tab_help(Tab::Liabilities, LIABILITY_APPEND_USAGE)
    }
}

pub struct AssetsGrammar;

impl CommandGrammar for AssetsGrammar {
    fn view_state(&self) -> ViewState {
        ViewState::ClientView(Tab::Assets)
    }

    fn parse(&self, line: &str) -> Result<Box<dyn Command>, ParseError> {
        parse_record_tab(
            RecordField::Assets,
            &self.help_text(),
            line,
            |args| parse_asset_attrs(args, ASSET_APPEND_USAGE).map(RecordValue::Asset),
            |args| {
                let (index, rest) = split_leading_index(args, ASSET_EDIT_USAGE)?;
                let asset = parse_asset_attrs(rest, ASSET_EDIT_USAGE)?;
                Ok((index, RecordValue::Asset(asset)))
            },
        )
    }

    fn help_text(&self) -> String {
        record_tab_help(Tab::Assets, ASSET_APPEND_USAGE)
    }
}

// ============================================================================
// NOTES TAB GRAMMAR
// ============================================================================

pub struct NotesGrammar;

impl CommandGrammar for NotesGrammar {
    fn view_state(&self) -> ViewState {
        ViewState::ClientView(Tab::Notes)
    }

    fn parse(&self, line: &str) -> Result<Box<dyn Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::invalid_format(EMPTY_INPUT_HINT));
        }
        let (word, rest) = split_word(line);
        if let Some(parsed) = parse_client_view_baseline(word, rest, &self.help_text()) {
            return parsed;
        }
        match word {
            EditNotesCommand::WORD => {
                if rest.is_empty() {
                    return Err(ParseError::invalid_format(EditNotesCommand::USAGE));
                }
                Ok(Box::new(EditNotesCommand {
                    text: rest.to_string(),
                }))
            }
            AppendNotesCommand::WORD => {
                if rest.is_empty() {
                    return Err(ParseError::invalid_format(AppendNotesCommand::USAGE));
                }
                Ok(Box::new(AppendNotesCommand {
                    text: rest.to_string(),
                }))
            }
            _ => Err(ParseError::UnknownCommand),
        }
    }

    fn help_text(&self) -> String {
        [
            "Notes tab commands:",
            "  edit TEXT (replaces the notes)",
            "  append TEXT (adds a line)",
            "  tab TAB (contact, policies, liabilities, assets, notes)",
            "  home",
            "  help",
            "  exit",
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Effect, Session};
    use crate::person::tests::person;
    use crate::store::ClientStore;
    use pretty_assertions::assert_eq;

    fn list_session() -> Session {
        let mut store = ClientStore::new();
        store.add(person("Alex Yeoh")).unwrap();
        store.add(person("Bernice Yu")).unwrap();
        Session::new(store)
    }

    fn view_session() -> Session {
        let mut session = list_session();
        let command = ClientListGrammar.parse("view 1").expect("view parses");
        command.execute(&mut session).expect("view executes");
        session
    }

    fn parse_err(grammar: &dyn CommandGrammar, line: &str) -> ParseError {
        grammar
            .parse(line)
            .map(|_| ())
            .expect_err("line should not parse")
    }

    // ------------------------------------------------------------------
    // client list grammar
    // ------------------------------------------------------------------

    #[test]
    fn test_list_grammar_bare_keywords() {
        for line in ["list", "clear", "help", "exit"] {
            assert!(ClientListGrammar.parse(line).is_ok(), "{} should parse", line);
        }
    }

    #[test]
    fn test_list_grammar_bare_keywords_reject_trailing_text() {
        assert_eq!(
            parse_err(&ClientListGrammar, "exit client"),
            ParseError::UnexpectedArguments
        );
        assert_eq!(
            parse_err(&ClientListGrammar, "list 2"),
            ParseError::UnexpectedArguments
        );
        assert_eq!(
            parse_err(&ClientListGrammar, "help me"),
            ParseError::UnexpectedArguments
        );
    }

    #[test]
    fn test_list_grammar_empty_input() {
        assert!(matches!(
            parse_err(&ClientListGrammar, "   "),
            ParseError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn test_list_grammar_unknown_command() {
        assert_eq!(
            parse_err(&ClientListGrammar, "unknownCommand"),
            ParseError::UnknownCommand
        );
    }

    #[test]
    fn test_list_grammar_rejects_client_view_verbs() {
        for line in ["tab policies", "home", "append n/x", "remove 1"] {
            assert_eq!(
                parse_err(&ClientListGrammar, line),
                ParseError::UnknownCommand,
                "{} should be unknown in the list context",
                line
            );
        }
    }

    #[test]
    fn test_list_grammar_view_and_delete_index_validation() {
        for line in ["view", "view 0", "view abc", "delete 0", "delete x"] {
            assert!(ClientListGrammar.parse(line).is_err(), "{} should fail", line);
        }
        assert!(ClientListGrammar.parse("view 1").is_ok());
        assert!(ClientListGrammar.parse("delete 2").is_ok());
    }

    #[test]
    fn test_list_grammar_add_builds_person() {
        let mut session = list_session();
        let command = ClientListGrammar
            .parse("add n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2 t/friends")
            .expect("valid add");
        command.execute(&mut session).expect("add executes");
        let added = session.store.persons().last().unwrap();
        assert_eq!(added.name().as_str(), "John Doe");
        assert_eq!(added.phone().as_str(), "98765432");
        assert_eq!(added.tags().len(), 1);
    }

    #[test]
    fn test_list_grammar_add_missing_prefix() {
        assert!(matches!(
            parse_err(&ClientListGrammar, "add n/John Doe p/98765432 e/johnd@example.com"),
            ParseError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn test_list_grammar_add_invalid_value() {
        assert!(matches!(
            parse_err(
                &ClientListGrammar,
                "add n/John Doe p/phone e/johnd@example.com a/311"
            ),
            ParseError::InvalidValue(_)
        ));
    }

    #[test]
    fn test_find_requires_keywords() {
        assert!(matches!(
            parse_err(&ClientListGrammar, "find"),
            ParseError::InvalidFormat { .. }
        ));
        let mut session = list_session();
        ClientListGrammar
            .parse("find yeoh")
            .unwrap()
            .execute(&mut session)
            .unwrap();
        assert_eq!(session.store.displayed().len(), 1);
    }

    // ------------------------------------------------------------------
    // client view baseline
    // ------------------------------------------------------------------

    #[test]
    fn test_client_view_baseline_keywords() {
        for grammar in [
            ViewState::ClientView(Tab::Contact),
            ViewState::ClientView(Tab::Policies),
            ViewState::ClientView(Tab::Notes),
        ]
        .map(grammar_for)
        {
            assert!(grammar.parse("help").is_ok());
            assert!(grammar.parse("exit").is_ok());
            assert!(grammar.parse("home").is_ok());
            assert!(grammar.parse("tab assets").is_ok());
            assert_eq!(
                parse_err(grammar.as_ref(), "exit client"),
                ParseError::UnexpectedArguments
            );
            assert_eq!(
                parse_err(grammar.as_ref(), "home improvement works"),
                ParseError::UnexpectedArguments
            );
            assert!(matches!(
                parse_err(grammar.as_ref(), "tab nonsense"),
                ParseError::InvalidFormat { .. }
            ));
            assert_eq!(
                parse_err(grammar.as_ref(), "unknownCommand"),
                ParseError::UnknownCommand
            );
        }
    }

    #[test]
    fn test_list_only_verbs_unknown_in_client_view() {
        let grammar = ContactGrammar;
        for line in ["list", "find alex", "delete 1", "view 1", "add n/X"] {
            assert_eq!(
                parse_err(&grammar, line),
                ParseError::UnknownCommand,
                "{} should be unknown on a tab",
                line
            );
        }
    }

    // ------------------------------------------------------------------
    // contact tab
    // ------------------------------------------------------------------

    #[test]
    fn test_contact_edit_changes_each_field() {
        let cases = [
            ("edit n/Allison Wang", "Allison Wang"),
            ("edit p/90725679", "90725679"),
            ("edit e/allison@email.com", "allison@email.com"),
            ("edit a/759 Yishun Street 72", "759 Yishun Street 72"),
        ];
        for (line, expected) in cases {
            let mut session = view_session();
            ContactGrammar
                .parse(line)
                .expect("valid edit")
                .execute(&mut session)
                .expect("edit executes");
            let edited = &session.store.persons()[0];
            let found = [
                edited.name().as_str(),
                edited.phone().as_str(),
                edited.email().as_str(),
                edited.address().as_str(),
            ]
            .contains(&expected);
            assert!(found, "{} should set the field to {}", line, expected);
        }
    }

    #[test]
    fn test_contact_edit_unrecognized_prefix() {
        assert!(matches!(
            parse_err(&ContactGrammar, "edit m/Allison Wang"),
            ParseError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn test_contact_edit_rejects_two_fields_at_once() {
        assert!(matches!(
            parse_err(&ContactGrammar, "edit n/Allison Wang p/90725679"),
            ParseError::InvalidFormat { .. }
        ));
    }

    // ------------------------------------------------------------------
    // record tabs
    // ------------------------------------------------------------------

    #[test]
    fn test_policies_append_parses_and_executes() {
        let mut session = view_session();
        PoliciesGrammar
            .parse("append n/Diamond Policy i/AIA iv/$10000 pr/$200 c/$1000")
            .expect("valid append")
            .execute(&mut session)
            .expect("append executes");
        let policies = session.store.persons()[0].policies();
        assert_eq!(policies.len(), 1);
        let policy = policies.iter().next().unwrap();
        assert_eq!(policy.insured_value().to_string(), "$10000");
    }

    #[test]
    fn test_policies_append_malformed_money_is_invalid_value() {
        let err = parse_err(
            &PoliciesGrammar,
            "append n/Diamond Policy i/AIA iv/10000 pr/$200 c/$1000",
        );
        assert!(matches!(err, ParseError::InvalidValue(_)));
    }

    #[test]
    fn test_policies_append_missing_prefix_is_usage_error() {
        assert!(matches!(
            parse_err(&PoliciesGrammar, "append n/Diamond Policy i/AIA iv/$10000"),
            ParseError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn test_liabilities_append_uses_its_own_prefixes() {
        let mut session = view_session();
        LiabilitiesGrammar
            .parse("append n/Property debt with DBS ty/debt v/$100000 r/10 percent annual interest")
            .expect("valid append")
            .execute(&mut session)
            .expect("append executes");
        let liabilities = session.store.persons()[0].liabilities();
        assert_eq!(liabilities.len(), 1);
        let liability = liabilities.iter().next().unwrap();
        assert_eq!(liability.name(), "Property debt with DBS");
        assert_eq!(liability.value().to_string(), "$100000");
    }

    #[test]
    fn test_record_remove_and_edit_index_forms() {
        assert!(PoliciesGrammar.parse("remove 1").is_ok());
        assert!(matches!(
            parse_err(&PoliciesGrammar, "remove"),
            ParseError::InvalidFormat { .. }
        ));
        assert_eq!(parse_err(&PoliciesGrammar, "remove 0"), ParseError::InvalidIndex);
        assert!(AssetsGrammar
            .parse("edit 1 n/HDB flat ty/property v/$550000 r/Revalued")
            .is_ok());
        assert!(matches!(
            parse_err(&AssetsGrammar, "edit n/HDB flat ty/property v/$550000 r/Revalued"),
            ParseError::InvalidIndex
        ));
    }

    // ------------------------------------------------------------------
    // notes tab
    // ------------------------------------------------------------------

    #[test]
    fn test_notes_edit_and_append() {
        let mut session = view_session();
        NotesGrammar
            .parse("edit Prefers email contact")
            .unwrap()
            .execute(&mut session)
            .unwrap();
        NotesGrammar
            .parse("append Met at annual review")
            .unwrap()
            .execute(&mut session)
            .unwrap();
        assert_eq!(
            session.store.persons()[0].notes().as_str(),
            "Prefers email contact\nMet at annual review"
        );
        assert!(matches!(
            parse_err(&NotesGrammar, "edit"),
            ParseError::InvalidFormat { .. }
        ));
    }

    // ------------------------------------------------------------------
    // factory
    // ------------------------------------------------------------------

    #[test]
    fn test_grammar_for_returns_matching_state() {
        for state in [
            ViewState::ClientList,
            ViewState::ClientView(Tab::Contact),
            ViewState::ClientView(Tab::Policies),
            ViewState::ClientView(Tab::Liabilities),
            ViewState::ClientView(Tab::Assets),
            ViewState::ClientView(Tab::Notes),
        ] {
            assert_eq!(grammar_for(state).view_state(), state);
        }
    }

    #[test]
    fn test_tab_switch_command_carries_effects() {
        let mut session = view_session();
        let result = ContactGrammar
            .parse("tab policies")
            .unwrap()
            .execute(&mut session)
            .unwrap();
        assert!(result.effects.contains(&Effect::SwitchTab(Tab::Policies)));
        assert!(result
            .effects
            .contains(&Effect::InstallGrammar(ViewState::ClientView(Tab::Policies))));
    }
}
