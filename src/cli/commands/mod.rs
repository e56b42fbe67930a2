pub mod check;
pub mod collect;
mod command_result;
mod context;
pub mod init;

pub use command_result::*;
