// Domain-layer modules and shared errors/models
pub mod models {
    pub use crate::models::*;
}

pub mod simulator {
    pub use crate::simulator::*;
}

pub mod errors {
    pub use crate::errors::*;
}
