//! Prompt command parsing.

use kanban_realtime_server::infrastructure::dto::websocket::ClientMessage;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  /join <board>           receive events of a board
  /leave <board>          stop receiving events of a board
  /online <user> <board>  announce a user online on a board
  /help                   show this help
  /quit                   disconnect and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(ClientMessage),
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command '{0}' (try /help)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = parts.collect();

    match (head, args.as_slice()) {
        ("/join", [board_id]) => Ok(Command::Send(ClientMessage::JoinBoard {
            board_id: board_id.to_string(),
        })),
        ("/join", _) => Err(CommandError::Usage("/join <board>")),
        ("/leave", [board_id]) => Ok(Command::Send(ClientMessage::LeaveBoard {
            board_id: board_id.to_string(),
        })),
        ("/leave", _) => Err(CommandError::Usage("/leave <board>")),
        ("/online", [user_id, board_id]) => Ok(Command::Send(ClientMessage::UserOnline {
            user_id: user_id.to_string(),
            board_id: board_id.to_string(),
        })),
        ("/online", _) => Err(CommandError::Usage("/online <user> <board>")),
        ("/help", _) => Ok(Command::Help),
        ("/quit" | "/exit", _) => Ok(Command::Quit),
        (other, _) => Err(CommandError::Unknown(other.to_string())),
    }
}
