// src/ui/mod.rs
pub mod analytics;
pub mod composer;
pub mod theme;
