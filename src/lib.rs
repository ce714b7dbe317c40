//! Glotsync - incremental machine translation of locale files
//!
//! Glotsync keeps `<locale>.json` translation catalogs in sync with a
//! default-locale source file. Each run diffs the source against the snapshot
//! cached by the previous run and sends only the changed keys to a remote
//! translation service, merging the results into the existing target files.
//!
//! ## Module Structure
//!
//! - `core`: Document tree, diff, placeholder reconciliation and merge
//! - `cache`: Snapshot of the last synced source document
//! - `locale_file`: Locale document I/O
//! - `translate`: Remote translation client and placeholder protection
//! - `sync`: The sync run tying everything together
//! - `hooks`: Build-start and file-change entry points
//! - `watch`: Locale folder watcher
//! - `report`: Progress events and terminal output
//! - `config`: Configuration file loading and parsing
//! - `cli`: Command-line interface

pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod hooks;
pub mod locale_file;
pub mod report;
pub mod sync;
pub mod translate;
pub mod watch;
