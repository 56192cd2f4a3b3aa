pub mod browse;
pub mod clear;
pub mod config;
pub mod context;
pub mod display;
pub mod prompts;
pub mod show;
pub mod watchlist;
