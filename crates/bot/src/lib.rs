pub mod commands;
pub mod discord;
pub mod errors;
pub mod startup;
pub mod state;

pub use startup::run;
