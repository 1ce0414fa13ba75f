//! Wire shapes of the board details payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default, deserialize_with = "position")]
    pub pos: Option<f64>,
    #[serde(default)]
    pub id_board: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCheckItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "position")]
    pub pos: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawChecklist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub id_board: String,
    #[serde(default)]
    pub id_card: String,
    #[serde(default, deserialize_with = "position")]
    pub pos: Option<f64>,
    #[serde(default)]
    pub check_items: Vec<RawCheckItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLabel {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAttachment {
    pub id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_upload: bool,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub id_list: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub id_checklists: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
}

/// Reads `board_json[key]` as an array of `T`. A missing key is an empty array.
pub(crate) fn array_field<T>(board_json: &Value, key: &str) -> Result<Vec<T>, String>
where
    T: for<'de> Deserialize<'de>,
{
    match board_json.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => {
            Vec::<T>::deserialize(value).map_err(|e| format!("invalid '{}' array: {}", key, e))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Position {
    Number(f64),
    Text(String),
}

/// Trello sends positions as numbers, older exports as numeric strings.
fn position<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Position>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Position::Number(n)) => Some(n),
        Some(Position::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}
