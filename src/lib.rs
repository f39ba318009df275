pub mod article;
pub mod config;
pub mod logging;
pub mod newsroom;
pub mod output;
pub mod scoring;
pub mod store;
pub mod trends;
