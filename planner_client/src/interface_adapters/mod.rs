pub mod clients;
pub mod commands;
pub mod protocol;
pub mod render;
