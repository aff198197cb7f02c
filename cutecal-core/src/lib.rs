//! Core types for cutecal.
//!
//! This crate provides everything the front ends share:
//! - `Event`, `Contact` and `Settings` as stored in the two JSON blobs
//! - `grid` for the 42-cell month page, `views` for week and day pages
//! - `storage` for the key-value persistence layer
//! - `config` for the global configuration file

pub mod config;
pub mod dates;
pub mod error;
pub mod event;
pub mod grid;
pub mod settings;
pub mod storage;
pub mod views;

pub use error::{CalError, CalResult};
pub use event::{Contact, Event};
pub use grid::{CalendarDay, MonthGrid, build_month_grid, build_month_grid_in};
pub use settings::{DefaultView, Settings, StartDayOfWeek, Theme};
