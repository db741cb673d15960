pub mod classifier;
pub mod mapper;
pub mod statement;
