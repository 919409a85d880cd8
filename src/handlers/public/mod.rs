// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, self-registration and service probes.

pub mod auth;   // POST /auth/login
pub mod system; // GET /, GET /health
pub mod users;  // POST /users
