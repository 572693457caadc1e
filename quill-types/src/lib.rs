pub mod control;
pub mod enums;
pub mod models;

pub use control::*;
pub use enums::*;
pub use models::*;
