//! Well-known role name constants.
//!
//! Roles arrive as a claim in the access token issued by the identity
//! service; this crate only compares against them.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_OFFICER: &str = "officer";

/// Officers and admins manage slots and override bookings.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_OFFICER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_officer_are_staff() {
        assert!(is_staff(ROLE_ADMIN));
        assert!(is_staff(ROLE_OFFICER));
    }

    #[test]
    fn students_and_interviewers_are_not_staff() {
        assert!(!is_staff("student"));
        assert!(!is_staff("interviewer"));
        assert!(!is_staff("unknown"));
    }
}
