// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod auth {
    pub use crate::auth::*;
}

pub mod docs {
    pub use crate::docs::*;
}

pub mod server {
    pub use crate::server::*;
}
