pub mod fs;
pub mod naming;
pub mod scanner;
