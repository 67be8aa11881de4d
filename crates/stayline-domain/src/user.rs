//! User role domain type.

use serde::{Deserialize, Serialize};

/// User permission level.
///
/// Wire format: `u8` (0 = Guest, 1 = Owner, 2 = Admin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Guest = 0,
    Owner = 1,
    Admin = 2,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Guest),
            1 => Some(Self::Owner),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_u8_to_user_role() {
        assert_eq!(UserRole::from_u8(0), Some(UserRole::Guest));
        assert_eq!(UserRole::from_u8(1), Some(UserRole::Owner));
        assert_eq!(UserRole::from_u8(2), Some(UserRole::Admin));
        assert_eq!(UserRole::from_u8(3), None);
    }

    #[test]
    fn should_convert_user_role_to_u8() {
        assert_eq!(UserRole::Guest.as_u8(), 0);
        assert_eq!(UserRole::Owner.as_u8(), 1);
        assert_eq!(UserRole::Admin.as_u8(), 2);
    }

    #[test]
    fn should_order_roles_by_privilege_level() {
        assert!(UserRole::Guest < UserRole::Owner);
        assert!(UserRole::Owner < UserRole::Admin);
        assert!(UserRole::Guest < UserRole::Admin);
    }

    #[test]
    fn should_round_trip_user_role_via_serde() {
        for role in [UserRole::Guest, UserRole::Owner, UserRole::Admin] {
            let json = serde_json::to_string(&role).unwrap();
            let parsed: UserRole = serde_json::from_str(&json).unwrap();
            assert_eq!(role, parsed);
        }
    }
}
