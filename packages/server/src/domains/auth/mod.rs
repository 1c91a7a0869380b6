// Auth domain - JWT verification for callers authenticated by the external
// accounts service. Token issuance (OTP, registration) lives outside this API.

pub mod jwt;

pub use jwt::{Claims, JwtService};
