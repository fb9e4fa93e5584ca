//! GNU as output for encoded strings.

pub mod banner;
pub mod writer;

pub use banner::Banner;
pub use writer::{AsmWriter, EncodedString};
