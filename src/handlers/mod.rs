// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token required).
// Routers are assembled in lib.rs; the JWT middleware wraps only the protected tier.
pub mod protected;
pub mod public;
