mod contact;
mod diagnostics;
mod health_check;

pub use contact::*;
pub use diagnostics::*;
pub use health_check::*;
