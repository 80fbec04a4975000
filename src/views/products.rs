use super::{next_page_link, ViewError};
use crate::models::product::{Page, Product};
use crate::models::query::SearchRequest;
use crate::utils::html::html_escape;

fn render_price(class: &str, amount: f64) -> String {
    format!(
        r#"<span class="price {}" data-price="{:.2}">{:.2}</span>"#,
        class, amount, amount
    )
}

fn render_product_row(product: &Product) -> String {
    format!(
        r#"<tr class="product" data-region="{region}">
    <td class="position">{id}</td>
    <td class="image"><img src="{img}" alt="{title}" loading="lazy"></td>
    <td class="name"><a href="{url}" target="_blank" rel="noopener">{name}</a><div class="title">{title}</div></td>
    <td>{price}</td>
    <td>{used}</td>
    <td>{save}</td>
    <td class="region">{region}</td>
</tr>
"#,
        id = product.id,
        img = html_escape(&product.img_url),
        url = html_escape(&product.url),
        name = html_escape(&product.name),
        title = html_escape(&product.title),
        price = render_price("list", product.price),
        used = render_price("used", product.used_price),
        save = render_price("save", product.save),
        region = html_escape(&product.region),
    )
}

/// Table rows for the page plus the row holding the "load more" link.
pub fn render_products(page: &Page, request: &SearchRequest) -> Result<String, ViewError> {
    let mut html: String = page.products.iter().map(render_product_row).collect();

    if page.has_more() {
        let link = html_escape(&next_page_link(page, request)?);
        html.push_str(&format!(
            r#"<tr class="load-more"><td colspan="7"><a href="{link}" data-append-url="{link}">Load more</a></td></tr>
"#
        ));
    }

    Ok(html)
}
