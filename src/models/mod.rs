pub mod input;
pub mod movie;
pub mod user;

pub use input::InvalidInput;
