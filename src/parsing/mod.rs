//! Parsers for uploaded sample metadata.
//!
//! Only one wire format is supported today: CSV with the columns
//! `id,region,age,seed`. Parsing is deliberately tolerant of individual bad
//! rows (they are skipped and counted) because field metadata exported from
//! spreadsheets is routinely messy.

pub mod csv;
