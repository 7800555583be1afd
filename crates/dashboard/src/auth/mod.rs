//! Route authorization gate.
//!
//! Runs ahead of every screen on every navigation. Verifies the signed
//! token carried in the `jwt` cookie, derives the caller's identity, and
//! allows, denies, or redirects. Verification fails closed: any parse or
//! signature problem clears the stored token so subsequent navigations
//! do not repeat the failed check.

mod claims;
mod gate;

pub use claims::{AuthError, CurrentUser, TokenVerifier};
pub use gate::{JWT_COOKIE, authorize, clear_jwt_cookie, set_jwt_cookie};
