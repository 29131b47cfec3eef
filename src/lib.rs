// src/lib.rs
pub mod api;
pub mod banner;
pub mod catalog;
pub mod client;
pub mod config;
pub mod errors;
pub mod interpreter;
pub mod models;
pub mod puzzle;
pub mod runner;
