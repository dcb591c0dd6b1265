// ABOUTME: Process-wide settings for the prism binary.
// ABOUTME: Nothing here outlives the process except the config file.

pub mod config;
