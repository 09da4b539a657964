pub mod config;
pub mod http;
pub mod process;
pub mod repositories;
