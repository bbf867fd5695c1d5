pub mod keywords;
pub mod scorer;
pub mod similarity;
pub mod tech_stack;
