pub mod book;
pub mod errors;
pub mod responses;
pub mod storage;
