pub mod lexer;
pub mod parser;
pub mod environment;
pub mod units;
pub mod elements;
pub mod eval;
pub mod interpreter;
pub mod utils;
