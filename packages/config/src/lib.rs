// ABOUTME: Configuration constants for Taskbot
// ABOUTME: Environment variable names and their defaults, shared by the server and the bot

pub mod constants;
