pub mod element;
pub mod table;

pub mod prelude {
    pub use super::{
        element::*,
        table::*
    };
}
