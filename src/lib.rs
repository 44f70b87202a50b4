pub mod config;
pub mod data;
pub mod storage;
pub mod repository;
pub mod query;
pub mod util;
mod lib_constants;
pub mod rng;
pub mod bin_constants;
pub mod logging;
