pub mod ast;
pub mod emit;
pub mod tokenize;
