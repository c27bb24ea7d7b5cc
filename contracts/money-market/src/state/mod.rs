pub use self::config::Config;

pub mod borrowable;
mod config;
