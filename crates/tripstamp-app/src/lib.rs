//! Application service layer - scan and billing use cases, config, export

pub mod app;
pub mod config;
pub mod export;
pub mod repository;
