//! Parsing of the lines typed at the prompt.

use core::str::FromStr;

use crate::error::CliError;

/// One player instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Finish the current year.
    EndTurn,
    /// Show the oldest unacknowledged notification.
    Board,
    /// Dismiss the notification on the board.
    Acknowledge,
    /// List pending decisions.
    Decisions,
    /// Show one pending decision with its options.
    Show {
        /// 1-based position in the decision list.
        decision: usize,
    },
    /// Pick an option of a pending decision.
    Resolve {
        /// 1-based position in the decision list.
        decision: usize,
        /// 1-based option number.
        option: usize,
    },
    /// City overview.
    Status,
    /// Command list.
    Help,
    /// Leave the game.
    Quit,
}

/// Shown for `help`.
pub const HELP: &str = "\
commands:
  end                 finish the year
  board               show the oldest unread notification
  ack                 dismiss it
  decisions           list pending decisions
  show <n>            show decision n and its options
  resolve <n> <opt>   pick option opt of decision n
  status              city overview
  help                this list
  quit                save and leave";

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CliError::UnknownCommand {
                input: String::new(),
            });
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "end" | "next" => Self::EndTurn,
            "board" => Self::Board,
            "ack" => Self::Acknowledge,
            "decisions" | "choices" => Self::Decisions,
            "show" => Self::Show {
                decision: position("show", words.next())?,
            },
            "resolve" => Self::Resolve {
                decision: position("resolve", words.next())?,
                option: position("resolve", words.next())?,
            },
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => {
                return Err(CliError::UnknownCommand {
                    input: line.trim().to_owned(),
                });
            }
        };

        if let Some(extra) = words.next() {
            return Err(CliError::InvalidArgument {
                command: name_of(command),
                reason: format!("unexpected argument '{extra}'"),
            });
        }
        Ok(command)
    }
}

const fn name_of(command: Command) -> &'static str {
    match command {
        Command::EndTurn => "end",
        Command::Board => "board",
        Command::Acknowledge => "ack",
        Command::Decisions => "decisions",
        Command::Show { .. } => "show",
        Command::Resolve { .. } => "resolve",
        Command::Status => "status",
        Command::Help => "help",
        Command::Quit => "quit",
    }
}

/// A 1-based number argument.
fn position(command: &'static str, word: Option<&str>) -> Result<usize, CliError> {
    let word = word.ok_or_else(|| CliError::InvalidArgument {
        command,
        reason: "missing number".to_owned(),
    })?;
    match word.parse::<usize>() {
        Ok(0) | Err(_) => Err(CliError::InvalidArgument {
            command,
            reason: format!("'{word}' is not a number starting at 1"),
        }),
        Ok(n) => Ok(n),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn plain_commands() {
        assert_eq!("end".parse::<Command>().unwrap(), Command::EndTurn);
        assert_eq!("  ACK ".parse::<Command>().unwrap(), Command::Acknowledge);
        assert_eq!("choices".parse::<Command>().unwrap(), Command::Decisions);
    }

    #[test]
    fn numbered_arguments() {
        assert_eq!(
            "resolve 2 1".parse::<Command>().unwrap(),
            Command::Resolve {
                decision: 2,
                option: 1
            }
        );
        assert_eq!("show 3".parse::<Command>().unwrap(), Command::Show { decision: 3 });
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(matches!(
            "show".parse::<Command>(),
            Err(CliError::InvalidArgument { command: "show", .. })
        ));
        assert!(matches!(
            "resolve 1 0".parse::<Command>(),
            Err(CliError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "status now".parse::<Command>(),
            Err(CliError::InvalidArgument { command: "status", .. })
        ));
    }

    #[test]
    fn unknown_words() {
        let err = "build house".parse::<Command>().unwrap_err();
        assert!(matches!(err, CliError::UnknownCommand { ref input } if input == "build house"));
    }
}
