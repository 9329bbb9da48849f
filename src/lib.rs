//! schooldir - client for a school directory service
//!
//! - `schema`: validation rules for a new school
//! - `form`: the add-school form and its submission state machine
//! - `api`: HTTP access to `/api/schools`
//! - `directory`: the searchable school list
//! - `cli`: the `schooldir` command-line interface

pub mod api;
pub mod cli;
pub mod config;
pub mod directory;
pub mod form;
pub mod observability;
pub mod schema;
