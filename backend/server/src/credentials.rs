use serde::Serialize;

/// Seeded console operator. Passwords are compared in plain text.
#[derive(Clone, Debug)]
pub struct AdminUser {
    pub id: u64,
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: u64,
    pub email: String,
    pub name: String,
}

impl AdminUser {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Email matches ignoring case, password must match exactly.
pub fn authenticate<'a>(
    admins: &'a [AdminUser],
    email: &str,
    password: &str,
) -> Option<&'a AdminUser> {
    let email = email.trim().to_lowercase();

    admins
        .iter()
        .find(|admin| admin.email.to_lowercase() == email && admin.password == password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Vec<AdminUser> {
        vec![AdminUser {
            id: 1,
            email: "admin@budaya.com".to_string(),
            password: "admin123".to_string(),
            name: "Admin User".to_string(),
        }]
    }

    #[test]
    fn test_email_case_ignored() {
        let admins = seeded();

        let admin = authenticate(&admins, "Admin@Budaya.COM", "admin123").unwrap();
        assert_eq!(admin.id, 1);
    }

    #[test]
    fn test_password_case_sensitive() {
        assert!(authenticate(&seeded(), "admin@budaya.com", "ADMIN123").is_none());
    }

    #[test]
    fn test_unknown_email() {
        assert!(authenticate(&seeded(), "guest@budaya.com", "admin123").is_none());
    }

    #[test]
    fn test_public_view_has_no_password() {
        let json = serde_json::to_value(seeded()[0].public()).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["name"], "Admin User");
    }
}
