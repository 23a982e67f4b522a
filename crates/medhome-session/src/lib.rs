//! Session credentials for the Medhome attendance API.
//!
//! A session is a signed HS256 JWT carried in the HTTP-only `auth_token`
//! cookie. This crate owns the whole lifecycle: issuing ([`token`]),
//! cookie plumbing ([`cookie`]), and the request-side auth gate
//! ([`identity::SessionUser`]).

pub mod cookie;
pub mod identity;
pub mod token;
