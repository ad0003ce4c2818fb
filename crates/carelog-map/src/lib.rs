#![deny(unsafe_code)]

pub mod coerce;
pub mod mapper;

pub use coerce::{Coercion, coerce};
pub use mapper::{MappedFields, apply, overflow_only};
