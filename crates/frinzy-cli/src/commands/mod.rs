pub mod config;
pub mod demo;
pub mod discover;
pub mod profiles;
pub mod roster;
pub mod score;
