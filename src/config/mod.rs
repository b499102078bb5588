//! Configuration module for Bizcrawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; omitted keys fall back to the crawler's default budgets.
//!
//! # Example
//!
//! ```no_run
//! use bizcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("bizcrawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, RenderConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
