mod builder;
mod descriptor;
mod error;
mod geometry;
mod indices;
mod prescription;
mod symmetries;
mod translator;

#[cfg(test)]
mod test_game;

pub use builder::*;
pub use descriptor::*;
pub use error::*;
pub use geometry::*;
pub use indices::*;
pub use prescription::*;
pub use symmetries::*;
pub use translator::*;
