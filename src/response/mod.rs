pub mod bode;
pub mod transfer;

pub use bode::{BodePoint, FrequencyRange, evaluate};
pub use transfer::TransferFunction;
