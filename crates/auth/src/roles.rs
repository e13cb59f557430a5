use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dashboard roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
    Cleaner,
    Maintenance,
    Owner,
    Guest,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Manager,
        Role::Cleaner,
        Role::Maintenance,
        Role::Owner,
        Role::Guest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Cleaner => "Cleaner",
            Role::Maintenance => "Maintenance",
            Role::Owner => "Owner",
            Role::Guest => "Guest",
        }
    }

    /// Name of the demo user a dev login for this role acts as.
    pub fn demo_user_name(self) -> &'static str {
        match self {
            Role::Admin => "Admin User",
            Role::Cleaner => "Elena Cleaner",
            _ => "John Owner",
        }
    }

    pub fn demo_user_email(self) -> &'static str {
        match self {
            Role::Admin => "admin@lodgex.com",
            _ => "staff@lodgex.com",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown role: {s}"))
    }
}
