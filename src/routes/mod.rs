mod data;
mod errors;
mod health;
mod http_utils;
mod index;

pub use data::*;
pub use errors::*;
pub use health::*;
pub use http_utils::*;
pub use index::*;
