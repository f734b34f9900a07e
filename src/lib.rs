mod exports;
pub use exports::*;

pub mod error;
pub mod hit;
pub mod parameters;
pub mod lor;
pub mod discrete;
pub mod sinogram;
pub mod creator;
pub mod diagnostic;
pub mod stats;
pub mod io;
pub mod config;
pub mod utils;
