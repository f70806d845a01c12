pub mod activity;
pub mod department;
pub mod interval;
pub mod punch;
pub mod report;
pub mod status;
pub mod user;
