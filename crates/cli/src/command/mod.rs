pub mod copy;
pub mod export;
pub mod paste;
pub mod render;
pub mod session;
