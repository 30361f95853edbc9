pub mod api;
pub mod app;
pub mod booking;
pub mod call;
pub mod chat;
pub mod cli;
pub mod clock;
pub mod config;
pub mod directory;
pub mod global;
pub mod navigation;
