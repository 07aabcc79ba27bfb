pub mod errors;
pub mod graph;
pub mod io;
pub mod log;
pub mod model;
pub mod route;
pub mod solver;
pub mod utils;

pub mod prelude {
    pub use super::errors::*;
    pub use super::graph::*;
    pub use super::io::*;
    pub use super::model::*;
    pub use super::route::*;
    pub use super::solver::*;
}

#[cfg(test)]
mod testing;
