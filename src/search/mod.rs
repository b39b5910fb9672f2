pub mod alpha_beta;
pub mod ensemble;
pub mod evaluation;
pub mod tables;

#[cfg(test)]
pub(crate) mod test_support;

pub use alpha_beta::*;
pub use ensemble::*;
pub use evaluation::*;
pub use tables::*;
