//! Canonical language vocabulary used by the reference backends.

pub mod keywords;
