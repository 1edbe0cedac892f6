//! Core utilities: time management

pub mod time;
