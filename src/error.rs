use std::path::PathBuf;

/// Errors raised by the board model and the move applier.
///
/// These are contract violations by the caller, never transient conditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board shape: {len} cells is not a positive multiple of {width}")]
    InvalidBoardShape { len: usize, width: usize },

    #[error("invalid cell value {value} at index {index}")]
    InvalidCell { index: usize, value: u8 },

    #[error("piece at row {row}, column {col} has an empty cell below it")]
    FloatingPiece { row: usize, col: usize },

    #[error("column {0} is out of range (expected 0..=6)")]
    ColumnOutOfRange(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} is empty")]
    ColumnEmpty(usize),
}

/// Errors surfaced when a player attempts a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("game is already over")]
    GameOver,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::InvalidBoardShape { len: 10, width: 7 };
        assert_eq!(
            err.to_string(),
            "invalid board shape: 10 cells is not a positive multiple of 7"
        );
        assert_eq!(
            BoardError::ColumnOutOfRange(9).to_string(),
            "column 9 is out of range (expected 0..=6)"
        );
        assert_eq!(
            BoardError::FloatingPiece { row: 1, col: 0 }.to_string(),
            "piece at row 1, column 0 has an empty cell below it"
        );
    }

    #[test]
    fn test_move_error_wraps_board_error() {
        let err: MoveError = BoardError::ColumnFull(3).into();
        assert_eq!(err, MoveError::Board(BoardError::ColumnFull(3)));
        assert_eq!(err.to_string(), "column 3 is full");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.rows must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.rows must be >= 1"
        );
    }
}
