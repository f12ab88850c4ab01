//! Bus route finder.
//!
//! Loads a bus network from CSV and answers: "How do I get from this stop
//! to that one with the least riding, counting every change of bus as a
//! fixed extra cost?"

pub mod config;
pub mod domain;
pub mod graph;
pub mod interactive;
pub mod loader;
pub mod planner;
pub mod report;
pub mod stops;
pub mod web;
