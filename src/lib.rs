pub mod cli;
pub mod config;
pub mod ethics;
pub mod logging;
pub mod protocol;
pub mod server;
