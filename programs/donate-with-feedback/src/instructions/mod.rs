pub mod donate;
pub mod initialize;
pub mod transfer;
pub mod view;
pub mod withdraw;

pub use donate::*;
pub use initialize::*;
pub use transfer::*;
pub use view::*;
pub use withdraw::*;
