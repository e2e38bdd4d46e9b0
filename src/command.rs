//! Chat command interpreter
//!
//! Reconfigures levels at runtime from commands typed on the host's chat
//! channel:
//!
//! ```text
//! /modlog set levels <handle> info|warning|error <level> [<level> ...]
//! /modlog clear levels <handle> info|warning|error <level> [<level> ...]
//! /modlog set|clear <handle> level info|warning|error <level> [<level> ...]
//! /modlog log <handle> info|warning|error <level> <message...>
//! /modlog show <handle>
//! ```
//!
//! Keywords are matched case-insensitively by prefix: an input token matches a
//! keyword when it is a prefix of it, so `inf` is `info` and `c` is `clear`.
//! Keyword tables are ordered and the first match wins, which is how `s`
//! resolves to `set` rather than `show`.
//!
//! Bad input never escapes as an error: it is answered with one usage line on
//! the command channel and a diagnostic on the service's own handle.

use crate::error::ModLogError;
use crate::logging::{Bands, CommandChannel, Severity};
use crate::service::ModLogService;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

// =============================================================================
// Input / output types
// =============================================================================

/// A message received on the chat channel
#[derive(Debug, Clone, Copy)]
pub struct ChatMessage<'a> {
    pub text: &'a str,
    /// Typed by the local player (remote players cannot reconfigure logging)
    pub from_local_player: bool,
    /// Flagged by the host as a command rather than chat text
    pub is_command: bool,
}

impl<'a> ChatMessage<'a> {
    /// A command typed by the local player
    pub fn local_command(text: &'a str) -> Self {
        Self {
            text,
            from_local_player: true,
            is_command: true,
        }
    }
}

/// A parsed, validated command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Enable (`set`) or disable (`clear`) levels of one band
    SetLevels {
        enable: bool,
        handle: String,
        severity: Severity,
        levels: Vec<i32>,
    },
    /// Queue a message through the gate
    Log {
        handle: String,
        severity: Severity,
        level: i32,
        message: String,
    },
    /// Report the active levels of a handle
    Show { handle: String },
}

/// Why a command was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A required token is missing (names what was expected)
    Missing(&'static str),
    UnknownVerb(String),
    UnknownSeverity(String),
    ExpectedKeyword {
        keyword: &'static str,
        found: String,
    },
    InvalidLevel(String),
    LevelOutOfRange {
        severity: Severity,
        level: i32,
        max: i32,
    },
    UnexpectedToken(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(what) => write!(f, "missing {}", what),
            Self::UnknownVerb(verb) => write!(f, "unknown command '{}'", verb),
            Self::UnknownSeverity(s) => write!(f, "unknown severity '{}'", s),
            Self::ExpectedKeyword { keyword, found } => {
                write!(f, "expected '{}', found '{}'", keyword, found)
            }
            Self::InvalidLevel(token) => write!(f, "'{}' is not a level", token),
            Self::LevelOutOfRange {
                severity,
                level,
                max,
            } => write!(
                f,
                "{} level {} out of range, must be between 0 and {}",
                severity, level, max
            ),
            Self::UnexpectedToken(token) => write!(f, "unexpected '{}'", token),
        }
    }
}

impl From<ModLogError> for CommandError {
    fn from(e: ModLogError) -> Self {
        match e {
            ModLogError::LevelOutOfRange {
                severity,
                level,
                max,
            } => Self::LevelOutOfRange {
                severity,
                level,
                max,
            },
            other => Self::InvalidLevel(other.to_string()),
        }
    }
}

/// Result of handling one chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not a command addressed to this service
    Ignored,
    Applied(Command),
    Rejected(CommandError),
}

// =============================================================================
// Tokenizer
// =============================================================================

/// Whitespace-separated token with its byte span in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    text: &'a str,
    start: usize,
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in input.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                tokens.push(Token {
                    text: &input[s..i],
                    start: s,
                });
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: &input[s..],
            start: s,
        });
    }
    tokens
}

// =============================================================================
// Keyword tables
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Set,
    Clear,
    Log,
    Show,
}

/// Declaration order is match priority
const VERBS: [(&str, Verb); 4] = [
    ("set", Verb::Set),
    ("clear", Verb::Clear),
    ("log", Verb::Log),
    ("show", Verb::Show),
];

const SEVERITIES: [(&str, Severity); 3] = [
    ("info", Severity::Info),
    ("warning", Severity::Warning),
    ("error", Severity::Error),
];

const LEVELS_KEYWORD: &str = "levels";
const LEVEL_KEYWORD: &str = "level";

/// True if `token` is a non-empty, case-insensitive prefix of `keyword`
fn is_prefix_of(token: &str, keyword: &str) -> bool {
    !token.is_empty()
        && token.len() <= keyword.len()
        && keyword.as_bytes()[..token.len()].eq_ignore_ascii_case(token.as_bytes())
}

/// First keyword in `table` that `token` is a prefix of
fn match_keyword<T: Copy>(token: &str, table: &[(&str, T)]) -> Option<T> {
    table
        .iter()
        .find(|(keyword, _)| is_prefix_of(token, keyword))
        .map(|(_, value)| *value)
}

// =============================================================================
// Parser
// =============================================================================

struct Cursor<'a> {
    input: &'a str,
    tokens: &'a [Token<'a>],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn next(&mut self, what: &'static str) -> Result<Token<'a>, CommandError> {
        let token = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or(CommandError::Missing(what))?;
        self.pos += 1;
        Ok(token)
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn expect_keyword(&mut self, keyword: &'static str) -> Result<(), CommandError> {
        let token = self.next(keyword)?;
        if is_prefix_of(token.text, keyword) {
            Ok(())
        } else {
            Err(CommandError::ExpectedKeyword {
                keyword,
                found: token.text.to_string(),
            })
        }
    }

    fn severity(&mut self) -> Result<Severity, CommandError> {
        let token = self.next("severity")?;
        match_keyword(token.text, &SEVERITIES)
            .ok_or_else(|| CommandError::UnknownSeverity(token.text.to_string()))
    }

    fn finish(&self) -> Result<(), CommandError> {
        match self.peek() {
            Some(token) => Err(CommandError::UnexpectedToken(token.text.to_string())),
            None => Ok(()),
        }
    }

    /// Remaining input, verbatim
    fn rest(&self) -> &'a str {
        match self.peek() {
            Some(token) => self.input[token.start..].trim_end(),
            None => "",
        }
    }
}

/// Turns command text into validated `Command`s
pub struct CommandParser {
    prefix: String,
    bands: Bands,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>, bands: Bands) -> Self {
        Self {
            prefix: prefix.into(),
            bands,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse `text`. `None` when it does not start with `/<prefix>`.
    ///
    /// Any text starting with `/<prefix>` is addressed to us, so a first token
    /// such as `/modlogs` is rejected rather than ignored.
    pub fn parse(&self, text: &str) -> Option<Result<Command, CommandError>> {
        let tokens = tokenize(text);
        let head = tokens.first()?;
        let name = head.text.strip_prefix('/')?;
        let addressed = name
            .get(..self.prefix.len())
            .is_some_and(|start| start.to_lowercase() == self.prefix.to_lowercase());
        if !addressed {
            return None;
        }
        if name.len() != self.prefix.len() {
            return Some(Err(CommandError::UnknownVerb(head.text.to_string())));
        }

        let mut cursor = Cursor {
            input: text,
            tokens: &tokens,
            pos: 1,
        };
        Some(self.parse_verb(&mut cursor))
    }

    fn parse_verb(&self, cursor: &mut Cursor<'_>) -> Result<Command, CommandError> {
        let token = cursor.next("command")?;
        let verb = match_keyword(token.text, &VERBS)
            .ok_or_else(|| CommandError::UnknownVerb(token.text.to_string()))?;

        match verb {
            Verb::Set => self.parse_set_clear(cursor, true),
            Verb::Clear => self.parse_set_clear(cursor, false),
            Verb::Log => self.parse_log(cursor),
            Verb::Show => {
                let handle = cursor.next("handle")?.text.to_string();
                cursor.finish()?;
                Ok(Command::Show { handle })
            }
        }
    }

    /// `levels <handle> <severity> <level>+` when the first token prefixes
    /// `levels`, otherwise `<handle> level <severity> <level>+`.
    ///
    /// Both forms have the same shape, so a leading token such as `lev` is
    /// always read as the keyword, never as a handle.
    fn parse_set_clear(&self, cursor: &mut Cursor<'_>, enable: bool) -> Result<Command, CommandError> {
        let leads_with_levels = cursor
            .peek()
            .is_some_and(|t| is_prefix_of(t.text, LEVELS_KEYWORD));

        if leads_with_levels {
            self.parse_levels_first(cursor, enable)
        } else {
            self.parse_handle_first(cursor, enable)
        }
    }

    fn parse_levels_first(
        &self,
        cursor: &mut Cursor<'_>,
        enable: bool,
    ) -> Result<Command, CommandError> {
        cursor.expect_keyword(LEVELS_KEYWORD)?;
        let handle = cursor.next("handle")?.text.to_string();
        let severity = cursor.severity()?;
        let levels = self.levels(cursor, severity)?;
        Ok(Command::SetLevels {
            enable,
            handle,
            severity,
            levels,
        })
    }

    fn parse_handle_first(
        &self,
        cursor: &mut Cursor<'_>,
        enable: bool,
    ) -> Result<Command, CommandError> {
        let handle = cursor.next("handle")?.text.to_string();
        cursor.expect_keyword(LEVEL_KEYWORD)?;
        let severity = cursor.severity()?;
        let levels = self.levels(cursor, severity)?;
        Ok(Command::SetLevels {
            enable,
            handle,
            severity,
            levels,
        })
    }

    fn parse_log(&self, cursor: &mut Cursor<'_>) -> Result<Command, CommandError> {
        let handle = cursor.next("handle")?.text.to_string();
        let severity = cursor.severity()?;
        let level = self.level(cursor.next("level")?.text, severity)?;
        let message = cursor.rest();
        if message.is_empty() {
            return Err(CommandError::Missing("message"));
        }
        Ok(Command::Log {
            handle,
            severity,
            level,
            message: message.to_string(),
        })
    }

    /// All remaining tokens as levels, at least one
    fn levels(&self, cursor: &mut Cursor<'_>, severity: Severity) -> Result<Vec<i32>, CommandError> {
        let mut levels = vec![self.level(cursor.next("level")?.text, severity)?];
        while let Some(token) = cursor.peek() {
            levels.push(self.level(token.text, severity)?);
            cursor.pos += 1;
        }
        Ok(levels)
    }

    fn level(&self, token: &str, severity: Severity) -> Result<i32, CommandError> {
        let level: i32 = token
            .parse()
            .map_err(|_| CommandError::InvalidLevel(token.to_string()))?;
        if self.bands.absolute(severity, level).is_none() {
            return Err(CommandError::LevelOutOfRange {
                severity,
                level,
                max: self.bands.max_level(severity),
            });
        }
        Ok(level)
    }
}

// =============================================================================
// Interpreter
// =============================================================================

/// Applies chat commands to the service
pub struct CommandInterpreter {
    parser: CommandParser,
    service: Arc<ModLogService>,
}

impl CommandInterpreter {
    pub fn new(service: Arc<ModLogService>) -> Self {
        let parser = CommandParser::new(
            service.config().command_prefix.clone(),
            service.gate().bands(),
        );
        Self { parser, service }
    }

    /// Usage line posted for rejected commands
    pub fn usage(&self) -> String {
        let p = self.parser.prefix();
        format!(
            "usage: \"/{p} set|clear levels <handle> info|warning|error <level1> <level2> ...\", \
             \"/{p} log <handle> info|warning|error <level> <message>\", \
             \"/{p} show <handle>\""
        )
    }

    /// Handle one chat message, answering on `channel`
    pub fn handle(&self, message: &ChatMessage<'_>, channel: &mut dyn CommandChannel) -> CommandOutcome {
        if !message.from_local_player || !message.is_command {
            return CommandOutcome::Ignored;
        }
        let parsed = match self.parser.parse(message.text) {
            Some(parsed) => parsed,
            None => return CommandOutcome::Ignored,
        };

        match parsed.and_then(|command| self.apply(command, channel)) {
            Ok(command) => {
                debug!(?command, "command applied");
                CommandOutcome::Applied(command)
            }
            Err(e) => {
                self.reject(&e, message.text, channel);
                CommandOutcome::Rejected(e)
            }
        }
    }

    fn apply(
        &self,
        command: Command,
        channel: &mut dyn CommandChannel,
    ) -> Result<Command, CommandError> {
        match &command {
            Command::SetLevels {
                enable,
                handle,
                severity,
                levels,
            } => {
                self.service
                    .gate()
                    .set_levels(handle, *severity, levels, *enable)
                    .map_err(CommandError::from)?;
                let levels_text = join_levels(levels);
                channel.post(&format!(
                    "{} {} levels {} for {}",
                    if *enable { "Set" } else { "Cleared" },
                    severity,
                    levels_text,
                    handle
                ));
            }
            Command::Log {
                handle,
                severity,
                level,
                message,
            } => {
                self.service.log(handle, *severity, *level, message);
            }
            Command::Show { handle } => {
                let gate = self.service.gate();
                let bands: Vec<String> = Severity::ALL
                    .iter()
                    .map(|s| format!("{} [{}]", s, join_levels(&gate.active_levels(handle, *s))))
                    .collect();
                channel.post(&format!("{}: {}", handle.to_lowercase(), bands.join(" ")));
            }
        }
        Ok(command)
    }

    fn reject(&self, error: &CommandError, text: &str, channel: &mut dyn CommandChannel) {
        warn!(command = text, %error, "rejected command");
        channel.post(&format!("Invalid command ({}), {}", error, self.usage()));
        self.service.log(
            self.service.default_handle(),
            Severity::Info,
            self.service.config().diagnostic_level,
            &format!("Invalid command: {}", error),
        );
    }
}

fn join_levels(levels: &[i32]) -> String {
    levels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::{MemorySink, ProcessClock, RecordingChannel};

    fn parser() -> CommandParser {
        CommandParser::new("modlog", Bands::default())
    }

    fn parse(text: &str) -> Result<Command, CommandError> {
        parser().parse(text).expect("addressed to modlog")
    }

    fn set(handle: &str, severity: Severity, levels: &[i32]) -> Command {
        Command::SetLevels {
            enable: true,
            handle: handle.to_string(),
            severity,
            levels: levels.to_vec(),
        }
    }

    fn interpreter() -> (Arc<ModLogService>, CommandInterpreter) {
        let mut config = Config::default();
        config.service.sanity_messages = false;
        let service = ModLogService::start(&config, &ProcessClock::new()).unwrap();
        let interpreter = CommandInterpreter::new(service.clone());
        (service, interpreter)
    }

    // === Tokenizer ===

    #[test]
    fn test_tokenize_keeps_spans() {
        let tokens = tokenize("  /modlog  log\tfoo ");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["/modlog", "log", "foo"]);
        assert_eq!(tokens[2].start, 15);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("   ").is_empty());
    }

    // === Keyword matching ===

    #[test]
    fn test_prefix_match() {
        assert!(is_prefix_of("inf", "info"));
        assert!(is_prefix_of("INFO", "info"));
        assert!(!is_prefix_of("infos", "info"));
        assert!(!is_prefix_of("", "info"));
        assert!(!is_prefix_of("é", "error"));
    }

    #[test]
    fn test_first_declared_keyword_wins() {
        assert_eq!(match_keyword("s", &VERBS), Some(Verb::Set));
        assert_eq!(match_keyword("sh", &VERBS), Some(Verb::Show));
        assert_eq!(match_keyword("l", &VERBS), Some(Verb::Log));
        assert_eq!(match_keyword("x", &VERBS), None);
    }

    // === Addressing ===

    #[test]
    fn test_other_prefixes_are_ignored() {
        assert!(parser().parse("/other set levels a info 1").is_none());
        assert!(parser().parse("/modlo set").is_none());
        assert!(parser().parse("modlog set").is_none());
        assert!(parser().parse("").is_none());
    }

    #[test]
    fn test_longer_first_token_is_addressed_and_rejected() {
        assert_eq!(
            parse("/ModLogs set levels foo info 1"),
            Err(CommandError::UnknownVerb("/ModLogs".to_string()))
        );
        assert_eq!(
            parse("/modlogx"),
            Err(CommandError::UnknownVerb("/modlogx".to_string()))
        );
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        assert_eq!(
            parse("/ModLog SET LEVELS Foo INFO 1"),
            Ok(set("Foo", Severity::Info, &[1]))
        );
    }

    // === Grammars ===

    #[test]
    fn test_levels_first_grammar() {
        assert_eq!(
            parse("/modlog set levels foo info 0 1 2"),
            Ok(set("foo", Severity::Info, &[0, 1, 2]))
        );
        assert_eq!(
            parse("/modlog clear levels foo warning 3"),
            Ok(Command::SetLevels {
                enable: false,
                handle: "foo".to_string(),
                severity: Severity::Warning,
                levels: vec![3],
            })
        );
    }

    #[test]
    fn test_handle_first_grammar() {
        assert_eq!(
            parse("/modlog set foo level error 0 4"),
            Ok(set("foo", Severity::Error, &[0, 4]))
        );
        assert_eq!(
            parse("/modlog c foo l w 1"),
            Ok(Command::SetLevels {
                enable: false,
                handle: "foo".to_string(),
                severity: Severity::Warning,
                levels: vec![1],
            })
        );
    }

    #[test]
    fn test_abbreviated_keywords() {
        assert_eq!(
            parse("/modlog s lev foo inf 2"),
            Ok(set("foo", Severity::Info, &[2]))
        );
    }

    #[test]
    fn test_leading_levels_prefix_is_the_keyword() {
        // Reads as `levels <handle=level>`, not `<handle=lev> level`.
        assert_eq!(
            parse("/modlog set lev level info 1"),
            Ok(set("level", Severity::Info, &[1]))
        );
        assert_eq!(
            parse("/modlog set levels level info 1"),
            Ok(set("level", Severity::Info, &[1]))
        );
    }

    #[test]
    fn test_log_keeps_message_verbatim() {
        assert_eq!(
            parse("/modlog log Foo warn 2 hello   big  world  "),
            Ok(Command::Log {
                handle: "Foo".to_string(),
                severity: Severity::Warning,
                level: 2,
                message: "hello   big  world".to_string(),
            })
        );
    }

    #[test]
    fn test_show() {
        assert_eq!(
            parse("/modlog sh foo"),
            Ok(Command::Show {
                handle: "foo".to_string()
            })
        );
        assert_eq!(
            parse("/modlog show foo bar"),
            Err(CommandError::UnexpectedToken("bar".to_string()))
        );
    }

    // === Errors ===

    #[test]
    fn test_unknown_verb() {
        assert_eq!(
            parse("/modlog foo bar"),
            Err(CommandError::UnknownVerb("foo".to_string()))
        );
        assert_eq!(parse("/modlog"), Err(CommandError::Missing("command")));
    }

    #[test]
    fn test_level_errors() {
        assert_eq!(
            parse("/modlog set levels foo info 99"),
            Err(CommandError::LevelOutOfRange {
                severity: Severity::Info,
                level: 99,
                max: 20
            })
        );
        assert_eq!(
            parse("/modlog set levels foo info 1 x"),
            Err(CommandError::InvalidLevel("x".to_string()))
        );
        assert_eq!(
            parse("/modlog set levels foo info -1"),
            Err(CommandError::LevelOutOfRange {
                severity: Severity::Info,
                level: -1,
                max: 20
            })
        );
        assert_eq!(
            parse("/modlog set levels foo info"),
            Err(CommandError::Missing("level"))
        );
    }

    #[test]
    fn test_handle_first_errors_are_reported() {
        assert_eq!(
            parse("/modlog set foo level info 99"),
            Err(CommandError::LevelOutOfRange {
                severity: Severity::Info,
                level: 99,
                max: 20
            })
        );
        assert_eq!(
            parse("/modlog set foo bar info 1"),
            Err(CommandError::ExpectedKeyword {
                keyword: "level",
                found: "bar".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_severity_and_missing_message() {
        assert_eq!(
            parse("/modlog log foo debug 1 hi"),
            Err(CommandError::UnknownSeverity("debug".to_string()))
        );
        assert_eq!(
            parse("/modlog log foo info 1"),
            Err(CommandError::Missing("message"))
        );
    }

    // === Interpreter ===

    #[test]
    fn test_interpreter_ignores_remote_and_plain_chat() {
        let (_service, interpreter) = interpreter();
        let mut channel = RecordingChannel::new();

        let remote = ChatMessage {
            text: "/modlog set levels foo info 1",
            from_local_player: false,
            is_command: true,
        };
        let chat = ChatMessage {
            text: "/modlog set levels foo info 1",
            from_local_player: true,
            is_command: false,
        };
        assert_eq!(interpreter.handle(&remote, &mut channel), CommandOutcome::Ignored);
        assert_eq!(interpreter.handle(&chat, &mut channel), CommandOutcome::Ignored);
        assert!(channel.posts.is_empty());
    }

    #[test]
    fn test_interpreter_applies_set_and_confirms() {
        let (service, interpreter) = interpreter();
        let mut channel = RecordingChannel::new();

        let outcome = interpreter.handle(
            &ChatMessage::local_command("/modlog set levels Foo info 0 2"),
            &mut channel,
        );
        assert!(matches!(outcome, CommandOutcome::Applied(_)));
        assert_eq!(service.gate().active_levels("foo", Severity::Info), vec![0, 2]);
        assert_eq!(channel.posts, vec!["Set info levels 0 2 for Foo"]);
    }

    #[test]
    fn test_interpreter_rejects_with_one_usage_and_diagnostic() {
        let (service, interpreter) = interpreter();
        let mut channel = RecordingChannel::new();

        let outcome = interpreter.handle(&ChatMessage::local_command("/modlog foo bar"), &mut channel);
        assert_eq!(
            outcome,
            CommandOutcome::Rejected(CommandError::UnknownVerb("foo".to_string()))
        );
        assert_eq!(channel.posts.len(), 1);
        assert!(channel.posts[0].starts_with("Invalid command (unknown command 'foo'), usage:"));
        assert!(service.gate().mask("foo").is_none());

        let mut sink = MemorySink::new();
        service.flush(&mut sink);
        assert_eq!(sink.infos.len(), 1);
        assert!(sink.infos[0].ends_with("[ModLog] {I 0} Invalid command: unknown command 'foo'"));
    }

    #[test]
    fn test_interpreter_out_of_range_mutates_nothing() {
        let (service, interpreter) = interpreter();
        let mut channel = RecordingChannel::new();

        interpreter.handle(
            &ChatMessage::local_command("/modlog set levels foo info 1 99"),
            &mut channel,
        );
        assert_eq!(service.gate().mask("foo"), None);
        assert_eq!(channel.posts.len(), 1);
    }

    #[test]
    fn test_interpreter_show() {
        let (service, interpreter) = interpreter();
        let mut channel = RecordingChannel::new();
        service.gate().set_levels("foo", Severity::Error, &[1], true).unwrap();
        service.gate().set_levels("foo", Severity::Info, &[0, 20], true).unwrap();

        interpreter.handle(&ChatMessage::local_command("/modlog show FOO"), &mut channel);
        assert_eq!(channel.posts, vec!["foo: error [1] warning [] info [0 20]"]);
    }

    #[test]
    fn test_interpreter_log_goes_through_gate() {
        let (service, interpreter) = interpreter();
        let mut channel = RecordingChannel::new();

        interpreter.handle(&ChatMessage::local_command("/modlog log foo info 1 dropped"), &mut channel);
        interpreter.handle(&ChatMessage::local_command("/modlog set levels foo info 1"), &mut channel);
        interpreter.handle(&ChatMessage::local_command("/modlog log foo info 1 kept"), &mut channel);

        let mut sink = MemorySink::new();
        service.flush(&mut sink);
        assert_eq!(sink.infos.len(), 1);
        assert!(sink.infos[0].ends_with("[foo] {I 1} kept"));
    }
}
