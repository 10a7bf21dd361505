//! Access-control domain types: tag identifiers and the member roster.

pub mod roster;
pub mod tag;
