use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: u32,
    pub title: String,
}
