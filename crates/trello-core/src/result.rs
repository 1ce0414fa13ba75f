use crate::error::TrelloError;

pub type TrelloResult<T> = Result<T, TrelloError>;
