mod classifier;
mod debug_log;
mod error;
