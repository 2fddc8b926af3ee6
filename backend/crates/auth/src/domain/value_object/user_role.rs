use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Staff role, ordered by weight: worker < admin < owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Worker,
    Admin,
    Owner,
}

impl UserRole {
    #[inline]
    pub const fn weight(&self) -> u8 {
        use UserRole::*;
        match self {
            Worker => 50,
            Admin => 80,
            Owner => 100,
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Worker => "worker",
            Admin => "admin",
            Owner => "owner",
        }
    }

    /// True when this role may act where `required` is the minimum.
    #[inline]
    pub const fn at_least(&self, required: UserRole) -> bool {
        self.weight() >= required.weight()
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "worker" => Some(Worker),
            "admin" => Some(Admin),
            "owner" => Some(Owner),
            _ => None,
        }
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight().cmp(&other.weight())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("Unknown role: {}", s))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("worker"), Some(UserRole::Worker));
        assert_eq!(UserRole::from_code("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("owner"), Some(UserRole::Owner));
        assert_eq!(UserRole::from_code("super_admin"), None);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Worker.to_string(), "worker");
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert_eq!(UserRole::Owner.to_string(), "owner");
    }

    #[test]
    fn test_user_role_ordering() {
        assert!(UserRole::Worker < UserRole::Admin);
        assert!(UserRole::Admin < UserRole::Owner);
        assert!(UserRole::Owner.at_least(UserRole::Admin));
        assert!(UserRole::Admin.at_least(UserRole::Admin));
        assert!(!UserRole::Worker.at_least(UserRole::Admin));
        assert!(!UserRole::Admin.at_least(UserRole::Owner));
    }

    #[test]
    fn test_user_role_serde_uses_codes() {
        let json = serde_json::to_string(&UserRole::Owner).unwrap();
        assert_eq!(json, "\"owner\"");
        let role: UserRole = serde_json::from_str("\"worker\"").unwrap();
        assert_eq!(role, UserRole::Worker);
        assert!(serde_json::from_str::<UserRole>("\"boss\"").is_err());
    }
}
