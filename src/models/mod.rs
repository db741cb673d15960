pub mod book;
pub mod responses;
pub mod search;
pub mod storage;
