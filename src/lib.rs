//! trans-collect - translation key collector for PHP/Blade projects
//!
//! Scans controllers and templates for translation calls such as
//! `trans('group.key')`, `Lang::choice('group.key', $n)` or
//! `@lang('group.key')`, and adds every key the current locale does not
//! define yet to its catalog as an empty string. Existing values are never
//! overwritten.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Collection engine (lexer, call extraction, catalogs, merge)

pub mod cli;
pub mod config;
pub mod core;
