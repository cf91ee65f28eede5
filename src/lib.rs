//! fracture
//! A library for damage tolerance crack growth prediction

pub static COMMENT: &str = "#  ";

extern crate log;

#[macro_use]
extern crate lazy_static;

pub mod beta;
pub mod dadn;
pub mod grow;
pub mod material;
pub mod plastic;
pub mod table;
