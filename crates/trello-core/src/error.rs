use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrelloError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cannot find board with name: {name}. Known boards: {}", known.join(", "))]
    BoardNotFound { name: String, known: Vec<String> },

    #[error(
        "The following lists were not found on the board: {}",
        names.iter().map(|n| format!("'{}'", n)).collect::<Vec<_>>().join(", ")
    )]
    ListsNotFound { names: Vec<String> },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_not_found_names_every_list() {
        let err = TrelloError::ListsNotFound {
            names: vec!["Non-Existent List".to_string(), "Another Missing".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "The following lists were not found on the board: 'Non-Existent List', 'Another Missing'"
        );
    }

    #[test]
    fn test_board_not_found_lists_known_boards() {
        let err = TrelloError::BoardNotFound {
            name: "Missing".to_string(),
            known: vec!["Work".to_string(), "Home".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Missing"));
        assert!(msg.contains("Work, Home"));
    }
}
