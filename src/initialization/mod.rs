mod initializer;

pub use initializer::*;

#[cfg(test)]
mod initializer_tests;
