pub mod commands;
pub mod input;
pub mod output;
pub mod trace_init;
