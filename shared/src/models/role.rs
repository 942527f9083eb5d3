use serde::{Deserialize, Serialize};

/// Request role, resolved once per request and passed explicitly into
/// core operations
///
/// Deliberately not read from ambient state: handlers receive it from
/// the request context and forward it where an operation is gated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    CafeAdmin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::CafeAdmin)
    }
}

/// Error for unknown role strings
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct InvalidRole(pub String);

impl std::str::FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "cafeadmin" => Ok(Role::CafeAdmin),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}
