pub mod config;
pub mod day;
pub mod delete;
pub mod events;
pub mod month;
pub mod new;
pub mod reset;
pub mod settings;
pub mod show;
pub mod week;
