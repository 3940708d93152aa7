// src/lib.rs

//! Broadcast: Call of Duty franchise feed watcher library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
