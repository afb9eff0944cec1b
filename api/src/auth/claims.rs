use serde::{Deserialize, Serialize};

/// JWT payload issued at registration and login.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID.
    pub sub: i64,
    /// Expiry as a unix timestamp.
    pub exp: usize,
    /// Whether the account carries the admin role. Checked by `allow_admin`;
    /// participants get `false`.
    pub admin: bool,
}

/// Extractor wrapper carrying the verified claims of the calling user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
