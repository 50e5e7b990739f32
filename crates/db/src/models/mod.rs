//! Row structs for the `lists` and `items` tables.

pub mod item;
pub mod list;
