use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: i64,
    pub section: String,
    pub row: String,
    pub number: i32,
    pub is_booked: bool,
    pub booked_by: Option<String>,
}

impl Seat {
    /// Label shown to users in conflict messages, e.g. "Royal R2#5".
    pub fn label(&self) -> String {
        format!("{} {}#{}", self.section, self.row, self.number)
    }
}
