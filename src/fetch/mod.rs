pub mod backend;
pub mod decode;
pub mod loader;
pub mod source;
