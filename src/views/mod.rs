//! Server-side HTML views, selected by name through the `template` parameter.

mod index;
mod products;

use crate::models::product::Page;
use crate::models::query::SearchRequest;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

pub use index::render_index;
pub use products::render_products;

/// View rendered when the request names none.
pub const DEFAULT_VIEW: &str = "index";

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),
    #[error("Failed to encode link: {0}")]
    Link(#[from] serde_urlencoded::ser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Full listing document.
    Index,
    /// Product rows only, appended below an existing listing.
    Products,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Index => "index",
            View::Products => "products",
        }
    }
}

impl FromStr for View {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "index" => Ok(View::Index),
            "products" => Ok(View::Products),
            other => Err(ViewError::UnknownTemplate(other.to_string())),
        }
    }
}

#[derive(Serialize)]
struct ListingLink<'a> {
    search: &'a str,
    order: String,
    offset: u32,
    template: &'static str,
}

/// Query string for the page that follows `page`.
pub(crate) fn next_page_link(page: &Page, request: &SearchRequest) -> Result<String, ViewError> {
    let search = request.terms().terms().join(" ");
    let link = ListingLink {
        search: &search,
        order: request.order().to_string(),
        offset: page.index,
        template: View::Products.name(),
    };

    Ok(format!("/?{}", serde_urlencoded::to_string(&link)?))
}

/// Renders `page` with the named view.
pub fn render(view: View, page: &Page, request: &SearchRequest) -> Result<String, ViewError> {
    match view {
        View::Index => render_index(page, request),
        View::Products => render_products(page, request),
    }
}
