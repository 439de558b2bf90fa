//! Input line parser.
//!
//! Every line the player submits (Enter) becomes one [`Command`]. A handful of
//! keywords are recognized case-insensitively; anything else is handed to the
//! session as a guess and validated there, so `"abc"` is a bad guess rather
//! than an unknown command.
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess(String),
    GiveUp,
    Next,
    Help,
    Quit,
}

impl Command {
    pub fn parse(raw: &str) -> Command {
        let trimmed = raw.trim();
        let lowered = trimmed.to_ascii_lowercase();
        let normalized = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
        let cmd = match normalized.as_str() {
            "giveup" | "give up" | "pass" | "/g" => Command::GiveUp,
            "next" | "retry" | "/n" => Command::Next,
            "help" | "?" | "/h" => Command::Help,
            "quit" | "exit" | "/q" => Command::Quit,
            _ => Command::Guess(trimmed.to_string()),
        };
        trace!("Parsed {:?} from \"{}\"", cmd, crate::logutil::preview_input(raw));
        cmd
    }
}

pub const HELP_TEXT: &str = "Type the base stat total and press Enter.\n\
Commands: giveup (reveal the total), next (retry loading), help, quit";
