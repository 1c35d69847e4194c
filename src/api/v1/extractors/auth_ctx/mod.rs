/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the request's authentication context (AuthCtx) to handlers
 * - axum-specific code lives in core, the plain types in types
 */

mod core;
mod types;

pub use self::core::CurrentPrincipal;
pub use types::{AuthCtx, AuthOutcome};
