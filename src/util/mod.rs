pub mod difficulty;
pub mod float_ext;
pub mod ruleset_ext;
pub mod special_functions;
