pub mod config;
pub mod models;
pub mod proxy_client;
pub mod storage;
pub mod store;
pub mod view;
