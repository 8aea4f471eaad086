pub mod catalog;
pub mod error;
pub mod feeds;
pub mod operations;
pub mod tools;
pub mod tracking;
