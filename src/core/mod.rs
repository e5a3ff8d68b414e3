pub mod message;
pub mod slots;
pub mod state;
