use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
}

impl AdminProfile {
    pub fn display_name(&self) -> String {
        match (self.name.is_empty(), self.phone.is_empty()) {
            (false, false) => format!("{} ({})", self.name, self.phone),
            (false, true) => self.name.clone(),
            (true, false) => self.phone.clone(),
            (true, true) => "(unnamed admin)".to_string(),
        }
    }
}
