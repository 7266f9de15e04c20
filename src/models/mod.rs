// src/models/mod.rs

pub mod attempt;
pub mod category;
pub mod question;
