// src/simulation/mod.rs

pub mod config;
pub mod pid_controller;
pub mod robot;
pub mod runner;

// src/simulation/mod.rs
