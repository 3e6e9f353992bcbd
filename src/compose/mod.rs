pub mod circle;
pub mod crop;
