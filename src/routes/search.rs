use crate::error::AppError;
use crate::models::query::{QueryError, SearchRequest, SearchTerms, SortOrder};
use crate::services::fetcher::{fetch, format_timestamp};
use crate::services::page::assemble_page;
use crate::views::{render, View, DEFAULT_VIEW};
use crate::Backend;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub order: Option<String>,
    pub offset: Option<String>,
    pub template: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SearchParams {
    /// Applies defaults: match-all search, `price ASC`, offset 0.
    pub fn to_request(&self) -> Result<SearchRequest, QueryError> {
        let terms = SearchTerms::parse(self.search.as_deref().unwrap_or_default());

        let order = match non_empty(&self.order) {
            Some(order) => order.parse::<SortOrder>()?,
            None => SortOrder::default(),
        };

        let offset = match non_empty(&self.offset) {
            Some(offset) => offset
                .parse::<u32>()
                .map_err(|_| QueryError::InvalidOffset(offset.to_string()))?,
            None => 0,
        };

        Ok(SearchRequest::new(terms, order, offset))
    }

    pub fn view(&self) -> Result<View, AppError> {
        Ok(non_empty(&self.template).unwrap_or(DEFAULT_VIEW).parse()?)
    }
}

/// Latest-update line for the page; an unusable value degrades to empty.
fn display_timestamp(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => format_timestamp(raw).unwrap_or_else(|e| {
            warn!("{}", e);
            String::new()
        }),
        None => String::new(),
    }
}

pub async fn search_products(
    Query(params): Query<SearchParams>,
    State(backend): State<Backend>,
) -> Result<Html<String>, AppError> {
    info!("Search query: {:?}", params);

    let view = params.view()?;
    let request = params.to_request()?;

    let fetched = fetch(backend.as_ref(), &request).await?;

    let page = assemble_page(
        fetched.rows,
        request.start_index(),
        fetched.count,
        fetched.matches,
        display_timestamp(fetched.latest_timestamp.as_deref()),
    );

    info!(
        "Rendering {} products ({} matches) with view '{}'",
        page.products.len(),
        page.matches,
        view.name()
    );

    Ok(Html(render(view, &page, &request)?))
}
