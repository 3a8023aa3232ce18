mod config;
mod report;
