use crate::models::product::{Page, Product};

/// Numbers the fetched rows for display and computes the next cursor.
///
/// The k-th row gets id `start_index + k + 1`; the next cursor is
/// `start_index + rows.len()` whatever the aggregate counts say.
pub fn assemble_page(
    rows: Vec<Product>,
    start_index: u32,
    count: u64,
    matches: u64,
    timestamp: String,
) -> Page {
    let mut index = start_index;

    let products = rows
        .into_iter()
        .map(|mut product| {
            index += 1;
            product.id = index;
            product
        })
        .collect();

    Page {
        products,
        count,
        matches,
        timestamp,
        index,
    }
}
