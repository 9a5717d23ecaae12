use crate::error::SimError;
use crate::robot::Command;
use std::str::FromStr;

/// One line typed into the interactive session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Look,
    Save,
    Quit,
}

impl FromStr for Input {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token {
            "look" => Ok(Input::Look),
            "save" => Ok(Input::Save),
            "exit" | "stop" | "quit" => Ok(Input::Quit),
            _ => Command::all()
                .into_iter()
                .find(|command| command.token() == token)
                .map(Input::Command)
                .ok_or_else(|| SimError::UnknownCommand(token.to_string())),
        }
    }
}
