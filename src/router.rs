// CommandRouter - error boundary and grammar swap point

use crate::adapter::AdapterError;
use crate::commands::{CommandError, Effect, Session, ViewState};
use crate::grammar::{grammar_for, CommandGrammar};
use tracing::{debug, warn};

/// The outcome of handling one input line, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterReply {
    pub message: String,
    pub is_error: bool,
    /// View-layer effects; `InstallGrammar` effects are consumed by the
    /// router itself and never appear here.
    pub effects: Vec<Effect>,
}

impl RouterReply {
    fn error(message: impl Into<String>) -> Self {
        RouterReply {
            message: message.into(),
            is_error: true,
            effects: Vec::new(),
        }
    }

    fn error_with_effects(message: impl Into<String>, effects: Vec<Effect>) -> Self {
        RouterReply {
            message: message.into(),
            is_error: true,
            effects,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.effects.contains(&Effect::Exit)
    }
}

/// Receives raw input lines, delegates to the active grammar strategy, runs
/// the parsed command, and applies grammar-swap effects.
///
/// Every parse or execution failure is converted into a displayed message;
/// nothing escapes to end the interactive session.
pub struct CommandRouter {
    grammar: Box<dyn CommandGrammar>,
}

impl CommandRouter {
    pub fn new() -> Self {
        CommandRouter {
            grammar: grammar_for(ViewState::ClientList),
        }
    }

    /// The view state whose grammar is currently active.
    pub fn view_state(&self) -> ViewState {
        self.grammar.view_state()
    }

    /// Parse and execute one line against the session.
    pub fn handle(&mut self, session: &mut Session, line: &str) -> RouterReply {
        debug!(state = ?self.view_state(), line, "handling command line");

        let command = match self.grammar.parse(line) {
            Ok(command) => command,
            Err(parse_error) => {
                debug!(%parse_error, "rejected input line");
                return RouterReply::error(parse_error.to_string());
            }
        };

        match command.execute(session) {
            Ok(result) => {
                let mut view_effects = Vec::with_capacity(result.effects.len());
                for effect in result.effects {
                    match effect {
                        Effect::InstallGrammar(state) => self.install(state),
                        other => view_effects.push(other),
                    }
                }
                RouterReply {
                    message: result.message,
                    is_error: false,
                    effects: view_effects,
                }
            }
            Err(CommandError::Adapter(AdapterError::ClientMissing)) => {
                // The open client vanished from the store; drop back to the
                // list context rather than keep editing a ghost.
                warn!("bound client left the store; falling back to the client list");
                session.view = None;
                self.install(ViewState::ClientList);
                RouterReply::error_with_effects(
                    CommandError::Adapter(AdapterError::ClientMissing).to_string(),
                    vec![Effect::ShowList],
                )
            }
            Err(command_error) => {
                debug!(%command_error, "command failed");
                RouterReply::error(command_error.to_string())
            }
        }
    }

    fn install(&mut self, state: ViewState) {
        self.grammar = grammar_for(state);
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        CommandRouter::new()
    }
}
