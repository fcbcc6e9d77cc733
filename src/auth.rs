//! Auth-domain identifiers, credential sets, secret wrappers, and realm resolution.

pub mod credential;
pub mod id;
pub mod realm;
pub mod secret;

pub use credential::*;
pub use id::*;
pub use realm::*;
pub use secret::*;
