use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrelloComment {
    pub id: String,
    pub author: String,
    /// `None` when the action carried no valid timestamp.
    pub date: Option<DateTime<Utc>>,
    pub contents: String,
}
