pub mod assets;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod navigator;
pub mod search;
pub mod stat_scale;
pub mod state;
