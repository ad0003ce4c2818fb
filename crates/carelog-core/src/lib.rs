#![deny(unsafe_code)]

pub mod assemble;
pub mod batch;
pub mod pipeline;

pub use assemble::assemble;
pub use batch::extract_batch;
pub use pipeline::extract_envelope;
