mod catalog;
mod contact;
mod health_check;

pub use catalog::*;
pub use contact::*;
pub use health_check::*;
