//! Warehouse access.

pub mod gold_filter {
    pub use crate::gold_filter::*;
}

pub mod gold_repository {
    pub use crate::gold_repository::*;
}
