use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Admin,
    Teacher,
    #[default]
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Roles a caller may pick for themselves when registering.
    pub fn is_self_assignable(self) -> bool {
        matches!(self, Role::Teacher | Role::Student)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(DomainError::UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn parses_known_roles_case_insensitively() {
        assert_eq!("Teacher".parse::<Role>(), Ok(Role::Teacher));
        assert_eq!(" student ".parse::<Role>(), Ok(Role::Student));
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "owner".parse::<Role>().expect_err("owner is not a role");

        assert_eq!(err.to_string(), "unknown role: owner");
    }

    #[test]
    fn admin_cannot_be_self_assigned() {
        assert!(!Role::Admin.is_self_assignable());
        assert!(Role::Teacher.is_self_assignable());
        assert!(Role::Student.is_self_assignable());
    }
}
