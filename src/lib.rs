pub mod cli;
pub mod config;
pub mod data;
pub mod parsers;
pub mod reporting;
pub mod selection;
