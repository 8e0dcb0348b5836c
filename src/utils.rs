use thiserror::Error;

/// Custom error types for the grammar engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("no rule declared for non-terminal: {0}")]
    MissingRule(String),

    #[error("rule for {0} declared with zero weight")]
    ZeroWeight(String),

    #[error("rule left-hand side {0} is a terminal")]
    TerminalLhs(String),

    #[error("expansion reached {symbols} symbols (limit {limit}) with non-terminals remaining")]
    FormOverflow { symbols: usize, limit: usize },

    #[error("expansion did not converge within {rounds} rounds")]
    RoundLimit { rounds: usize },
}

/// Result type for grammar operations
pub type Result<T> = std::result::Result<T, GrammarError>;
