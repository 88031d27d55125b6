pub mod catalog;
pub mod config;
pub mod division;
pub mod http_client;
pub mod picker;
pub mod predict;
pub mod provider;
pub mod slug;
pub mod state;
pub mod weight_class;
