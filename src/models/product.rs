use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Display position once a page is assembled; the storage id before that.
    pub id: u32,
    pub name: String,
    pub url: String,
    pub img_url: String,
    pub title: String,
    pub price: f64,
    pub used_price: f64,
    pub save: f64,
    pub region: String,
    pub timestamp: String,
}

/// One rendered batch of products plus listing-wide metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub products: Vec<Product>,
    /// Rows in the whole collection, regardless of the search filter.
    pub count: u64,
    /// Rows matching the current search filter.
    pub matches: u64,
    /// Latest update across the dataset, `DD-Mon-YYYY HH:MM:SS`, or empty.
    pub timestamp: String,
    /// Start index of the following page.
    pub index: u32,
}

impl Page {
    pub fn has_more(&self) -> bool {
        u64::from(self.index) < self.matches
    }
}
