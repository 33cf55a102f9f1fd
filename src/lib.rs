pub mod api_client;
pub mod commands;
pub mod config;
pub mod requirements;
pub mod stacks;
pub mod ui;
