pub mod app;
pub mod cli;
pub mod commands;
pub mod context;
pub mod feedback;
pub mod rest;
pub mod storage;
pub mod tracing;
pub mod types;
