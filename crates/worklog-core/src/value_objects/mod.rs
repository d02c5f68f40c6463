//! Value objects - small immutable domain types

mod access_level;

pub use access_level::AccessLevel;
