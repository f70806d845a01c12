pub mod admin;
pub mod aggregate;
pub mod auto_checkout;
pub mod calculator;
pub mod config;
pub mod logic;
pub mod punch;
pub mod status;
