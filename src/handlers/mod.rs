// src/handlers/mod.rs

pub mod home;
pub mod quiz;
