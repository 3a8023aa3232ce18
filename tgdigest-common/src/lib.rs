mod config;
pub mod digest;
pub mod filter;
pub mod message;
pub mod normalize;

pub use config::{DigestConfig, Language};

#[cfg(test)]
mod tests;
