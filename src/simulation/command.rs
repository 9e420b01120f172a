//! User commands forwarded from the presentation layer
//!
//! Text form, one command per string:
//!
//! ```text
//! play
//! pause
//! restart
//! speed 16
//! rule 9-26/5-7,12-13,15/5
//! ```

use std::fmt;
use std::str::FromStr;

use crate::automaton::rule::Rule;
use crate::error::CommandParseError;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Restart,
    /// Ticks per second
    SetSpeed(f32),
    SetRule(Rule),
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = match s.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (s, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandParseError::Empty),
            "play" => Ok(Command::Play),
            "pause" => Ok(Command::Pause),
            "restart" => Ok(Command::Restart),
            "speed" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument("speed"));
                }
                rest.parse()
                    .map(Command::SetSpeed)
                    .map_err(|_| CommandParseError::InvalidSpeed(rest.to_string()))
            }
            "rule" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument("rule"));
                }
                Ok(Command::SetRule(rest.parse()?))
            }
            _ => Err(CommandParseError::Unknown(word.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Play => f.write_str("play"),
            Command::Pause => f.write_str("pause"),
            Command::Restart => f.write_str("restart"),
            Command::SetSpeed(tps) => write!(f, "speed {tps}"),
            Command::SetRule(rule) => write!(f, "rule {rule}"),
        }
    }
}
