mod serialization;

pub mod model;
pub mod parser;
pub mod term;

pub use crate::model::*;
pub use crate::parser::*;
pub use crate::term::*;
