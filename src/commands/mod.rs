pub mod config;
pub mod rewrite;
pub mod serve;
