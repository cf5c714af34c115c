//! Parser for screen and crop specifications

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::{parse_region, parse_screen};
