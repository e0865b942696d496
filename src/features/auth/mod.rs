//! Admin authentication: email+password login issuing HS256 bearer tokens.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/login` | No | Login, returns bearer token |
//! | GET | `/api/auth/me` | Yes | Current admin profile |
//! | POST | `/api/auth/change-password` | Yes | Change own password |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};
