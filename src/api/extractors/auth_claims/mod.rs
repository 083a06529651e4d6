/*!
 * Authenticated claims extractor
 *
 * Responsibility:
 * - Hand the verified claim set (AuthenticatedClaims) to handlers
 * - axum-dependent code stays in core; the type lives in types
 *
 * Public API:
 * - AuthenticatedClaims
 * - AuthClaimsExtractor
 */

mod core;
mod types;

pub use core::AuthClaimsExtractor;
pub use types::AuthenticatedClaims;
