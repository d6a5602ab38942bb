pub mod capability;
pub mod fees;
pub mod fill;
pub mod order;
pub mod signing;
pub mod verification;

pub use capability::*;
pub use fees::*;
pub use fill::*;
pub use order::*;
pub use signing::*;
pub use verification::*;

/// Name bound into every signing domain
pub const DOMAIN_NAME: &str = "Limit Order Settlement";

/// Version bound into every signing domain
pub const DOMAIN_VERSION: &str = "1";
