pub mod bump;
pub mod config;
pub mod definition;
pub mod report;
pub mod runner;
pub mod upstream;
