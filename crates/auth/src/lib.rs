//! `lodgex-auth` — authentication/authorization boundary.
//!
//! Decoupled from HTTP and storage: token encoding, claims validation and the
//! role → permission policy.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{authorize, AuthzError};
pub use claims::{validate_claims, JwtClaims, TokenValidationError};
pub use jwt::{Hs256JwtValidator, JwtValidator, TokenError, TokenIssuer};
pub use permissions::{permissions_for_role, Permission};
pub use principal::Principal;
pub use roles::Role;
