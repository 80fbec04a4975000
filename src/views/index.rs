use super::{render_products, ViewError};
use crate::models::product::Page;
use crate::models::query::{SearchRequest, SortColumn, SortDirection, SortOrder};
use crate::utils::html::html_escape;

const SORT_OPTIONS: [(SortOrder, &str); 6] = [
    (SortOrder::new(SortColumn::Price, SortDirection::Asc), "Price: low to high"),
    (SortOrder::new(SortColumn::Price, SortDirection::Desc), "Price: high to low"),
    (SortOrder::new(SortColumn::UsedPrice, SortDirection::Asc), "Used price: low to high"),
    (SortOrder::new(SortColumn::Save, SortDirection::Desc), "Biggest savings"),
    (SortOrder::new(SortColumn::Name, SortDirection::Asc), "Name"),
    (SortOrder::new(SortColumn::Timestamp, SortDirection::Desc), "Recently updated"),
];

fn render_sort_select(current: SortOrder) -> String {
    let options: String = SORT_OPTIONS
        .iter()
        .map(|(order, label)| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                order,
                if *order == current { " selected" } else { "" },
                label
            )
        })
        .collect();

    format!(r#"<select name="order" onchange="this.form.submit()">{}</select>"#, options)
}

fn render_summary(page: &Page, request: &SearchRequest) -> String {
    let matched = if request.terms().is_all() {
        format!("{} products", page.count)
    } else {
        format!("{} of {} products match", page.matches, page.count)
    };

    if page.timestamp.is_empty() {
        format!(r#"<p class="summary">{}</p>"#, matched)
    } else {
        format!(
            r#"<p class="summary">{} &middot; last updated <time>{}</time></p>"#,
            matched,
            html_escape(&page.timestamp)
        )
    }
}

/// Full listing document.
pub fn render_index(page: &Page, request: &SearchRequest) -> Result<String, ViewError> {
    let search = request.terms().terms().join(" ");
    let rows = render_products(page, request)?;

    let body = if page.products.is_empty() {
        r#"<p class="empty">No products found.</p>"#.to_string()
    } else {
        format!(
            r#"<table class="products">
    <thead>
        <tr><th>#</th><th></th><th>Product</th><th>Price</th><th>Used</th><th>Save</th><th>Region</th></tr>
    </thead>
    <tbody id="product-rows">
{}    </tbody>
</table>"#,
            rows
        )
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Product search</title>
    <script src="/public/script.js" defer></script>
</head>
<body>
<header>
    <form method="get" action="/" class="search">
        <input type="search" name="search" value="{search}" placeholder="Search products" autofocus>
        {sort}
        <button type="submit">Search</button>
    </form>
    {summary}
</header>
<main>
{body}
</main>
</body>
</html>
"#,
        search = html_escape(&search),
        sort = render_sort_select(request.order()),
        summary = render_summary(page, request),
        body = body,
    ))
}
