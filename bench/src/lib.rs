/// The program every benchmark runs on.
pub static INPUT: &str = include_str!("../../fixtures/branches.oo");
