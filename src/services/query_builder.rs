use crate::models::query::{BindValue, BuiltQuery, SearchRequest, SearchTerms, PAGE_SIZE};

/// Columns read for every product row. Prices are cast so whole numbers
/// stored as INTEGER decode as REAL.
pub const PRODUCT_COLUMNS: &str = "id, name, url, img_url, title, \
     CAST(price AS REAL) AS price, \
     CAST(used_price AS REAL) AS used_price, \
     CAST(save AS REAL) AS save, \
     region, timestamp";

/// Escapes `LIKE` wildcards so a term only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends `WHERE name LIKE ?1 ESCAPE '\' AND ...` for each term, binding
/// `%term%`.
fn push_name_filter(sql: &mut String, params: &mut Vec<BindValue>, terms: &SearchTerms) {
    if terms.is_all() {
        return;
    }

    let conditions: Vec<String> = terms
        .terms()
        .iter()
        .map(|term| {
            params.push(BindValue::Text(format!("%{}%", escape_like(term))));
            format!("name LIKE ?{} ESCAPE '\\'", params.len())
        })
        .collect();

    sql.push_str(" WHERE ");
    sql.push_str(&conditions.join(" AND "));
}

/// Builds the page query for a listing request.
///
/// Term patterns are bound first, in order, and the offset is always the
/// last parameter. An empty term list selects every product. Ties in the
/// requested order are broken by `id` so pages never overlap.
pub fn build_query(request: &SearchRequest) -> BuiltQuery {
    let mut sql = format!("SELECT {} FROM products", PRODUCT_COLUMNS);
    let mut params = Vec::with_capacity(request.terms().terms().len() + 1);

    push_name_filter(&mut sql, &mut params, request.terms());

    params.push(BindValue::Integer(i64::from(request.offset())));
    sql.push_str(&format!(
        " ORDER BY {}, id LIMIT {} OFFSET ?{}",
        request.order(),
        PAGE_SIZE,
        params.len()
    ));

    BuiltQuery { sql, params }
}

/// Counts the products matching the search terms.
pub fn build_match_count_query(terms: &SearchTerms) -> BuiltQuery {
    let mut sql = String::from("SELECT COUNT(*) FROM products");
    let mut params = Vec::with_capacity(terms.terms().len());

    push_name_filter(&mut sql, &mut params, terms);

    BuiltQuery { sql, params }
}

/// Counts the whole collection.
pub fn total_count_query() -> BuiltQuery {
    BuiltQuery {
        sql: "SELECT COUNT(*) FROM products".to_string(),
        params: Vec::new(),
    }
}
