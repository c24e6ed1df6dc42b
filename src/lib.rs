pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod pipeline;
pub mod products;
pub mod scanner;
