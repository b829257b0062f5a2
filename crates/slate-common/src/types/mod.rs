//! Core data types for the Slate quoting engine

pub mod breakdown;
pub mod draft;
pub mod money;
pub mod request;
pub mod tier;
