pub mod slots;
pub mod view;
