pub mod product;
pub mod query;
pub mod responses;
pub mod storage;
