pub mod fetcher;
pub mod page;
pub mod query_builder;
