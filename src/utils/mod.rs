// src/utils/mod.rs

pub mod chart;
