use thiserror::Error;

/// The four failure kinds the game distinguishes. Which of them are fatal
/// and which merely forfeit the match is decided at the referee boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Fault {
    /// An internal caller broke an interaction-protocol precondition.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// A wire value that does not decode into any known command.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// A well-formed but illegal answer: a rule-breaking play, placement
    /// onto an occupied cell, or a board the player refuses to accept.
    #[error("illegal play: {0}")]
    IllegalPlay(String),

    /// The remote side answered with garbage, an error token, or not at all.
    #[error("illegal response: {0}")]
    IllegalResponse(String),
}

pub type Result<T> = std::result::Result<T, Fault>;

impl Fault {
    pub fn contract(msg: impl Into<String>) -> Fault {
        Fault::ContractViolation(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Fault {
        Fault::InvalidCommand(msg.into())
    }

    pub fn illegal(msg: impl Into<String>) -> Fault {
        Fault::IllegalPlay(msg.into())
    }

    pub fn response(msg: impl Into<String>) -> Fault {
        Fault::IllegalResponse(msg.into())
    }

    /// The error token a player side emits over the wire in place of a
    /// normal response. An `IllegalResponse` never crosses the wire; it is
    /// what the *reader* of a dead or garbled socket produces locally.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Fault::ContractViolation(_) => Some("ContractViolation"),
            Fault::InvalidCommand(_) => Some("InvalidCommand"),
            Fault::IllegalPlay(_) => Some("IllegalPlay"),
            Fault::IllegalResponse(_) => None,
        }
    }

    /// Inverse of [`Fault::token`], used by the proxy side when a response
    /// turns out to be an error token instead of an answer.
    pub fn from_token(token: &str) -> Option<Fault> {
        match token {
            "ContractViolation" => Some(Fault::contract("remote player signalled a contract violation")),
            "InvalidCommand" => Some(Fault::invalid("remote player rejected the command")),
            "IllegalPlay" => Some(Fault::illegal("remote player signalled an illegal play")),
            _ => None,
        }
    }
}
