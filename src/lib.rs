pub mod api;
pub mod config;
pub mod entities;
pub mod migration;
pub mod pages;
pub mod store;
