pub mod error;
pub mod random;
#[cfg(test)]
pub mod test_support;

pub use error::*;
pub use random::*;
