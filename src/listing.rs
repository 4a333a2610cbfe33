use serde::{Deserialize, Serialize};

// Data structure for a place record as served by the listings endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub address: String,
    pub price: u32,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl Listing {
    // The card view renders the first photo when one exists
    pub fn cover_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }
}
