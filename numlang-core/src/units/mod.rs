pub mod error;
pub mod registry;

pub mod prelude {
    pub use super::{
        error::*,
        registry::*
    };
}

#[cfg(test)]
mod tests;
