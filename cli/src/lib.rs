//! Command-line front end for the fleet catalog: API-style JSON queries,
//! local search history and an interactive suggestion prompt.

pub mod cli;
pub mod commands;
pub mod utils;
