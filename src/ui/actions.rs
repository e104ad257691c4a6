//! User actions typed at the prompt

use std::str::FromStr;

use super::views::RemoteAction;

pub const HELP: &str = "\
Commands:
  aircon | hazard | finder   remote services on the home screen
  back                       return to the previous screen
  start                      start the air conditioner with the shown settings
  stop                       stop the air conditioner
  set <minutes>              change the run time (1-60)
  clear                      dismiss the error banner
  help                       show this help
  quit                       exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Remote(RemoteAction),
    Back,
    Start,
    Stop,
    SetStartupMinutes(i32),
    ClearError,
    Help,
    Quit,
}

impl FromStr for UserAction {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let command = words.next().ok_or_else(|| "Empty command".to_string())?;

        let action = match command.to_ascii_lowercase().as_str() {
            "back" => Self::Back,
            "start" => Self::Start,
            "stop" => Self::Stop,
            "clear" => Self::ClearError,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "set" => {
                let minutes = words
                    .next()
                    .ok_or_else(|| "Usage: set <minutes>".to_string())?;
                let minutes = minutes
                    .parse()
                    .map_err(|e| format!("Invalid minutes '{}': {}", minutes, e))?;
                Self::SetStartupMinutes(minutes)
            }
            other => RemoteAction::ALL
                .into_iter()
                .find(|action| action.command() == other)
                .map(Self::Remote)
                .ok_or_else(|| format!("Unknown command '{}', type 'help'", other))?,
        };

        if let Some(extra) = words.next() {
            return Err(format!("Unexpected argument '{}'", extra));
        }
        Ok(action)
    }
}
