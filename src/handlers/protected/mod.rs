// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind jwt_auth_middleware, so handlers can extract
// AuthUser (directly or through OwnerPath) without re-checking the header.

pub mod orders; // /users/:id/orders
pub mod users;  // /users, /users/:id
