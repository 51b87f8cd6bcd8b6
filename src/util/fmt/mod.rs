pub mod tree;

pub use tree::{print_expr_string, print_program_string};
