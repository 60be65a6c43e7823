pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;

pub use claims::Claims;
pub use jwt::TokenService;
pub use middleware::{AuthenticatedUser, QueryTokenUser};
pub use password::{check_credential, hash_password, CredentialMatch};
pub use policy::{authorize, decide, Action, Caller, Decision, Resource, ResourceKind};
