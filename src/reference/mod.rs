pub mod parser;
pub mod token;

pub use parser::*;
pub use token::*;
