use serde::Serialize;

pub type ChecklistId = String;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrelloChecklistItem {
    pub id: String,
    pub value: String,
    pub checked: bool,
    pub position: Option<f64>,
    url: Option<String>,
    url_title: Option<String>,
}

impl TrelloChecklistItem {
    pub fn new(id: String, value: String, checked: bool, position: Option<f64>) -> Self {
        Self {
            id,
            value,
            checked,
            position,
            url: None,
            url_title: None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn url_title(&self) -> Option<&str> {
        self.url_title.as_deref()
    }

    /// The url and its title are always assigned together.
    pub fn set_url_title(&mut self, url: String, title: String) {
        self.url = Some(url);
        self.url_title = Some(title);
    }

    pub fn html(&self) -> String {
        match (&self.url, &self.url_title) {
            (Some(url), Some(title)) => format!("<a href={}>{}</a>", url, title),
            _ => self.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrelloChecklist {
    pub id: ChecklistId,
    pub name: String,
    pub board_id: String,
    pub card_id: String,
    pub position: Option<f64>,
    pub items: Vec<TrelloChecklistItem>,
}
