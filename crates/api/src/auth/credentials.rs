//! The admin account configured through `ADMIN_USERNAME` / `ADMIN_PASSWORD`.

use sha2::{Digest, Sha256};

/// Default admin username when `ADMIN_USERNAME` is unset.
const DEFAULT_ADMIN_USERNAME: &str = "admin";

#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// `None` disables login entirely.
    pub password: Option<String>,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AdminCredentials {
    /// | Env Var          | Default |
    /// |------------------|---------|
    /// | `ADMIN_USERNAME` | `admin` |
    /// | `ADMIN_PASSWORD` | --      |
    pub fn from_env() -> Self {
        let username = std::env::var("ADMIN_USERNAME")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string());
        let password = std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty());
        if password.is_none() {
            tracing::warn!("ADMIN_PASSWORD is not set; admin login is disabled");
        }
        Self { username, password }
    }

    /// Check a login attempt.
    ///
    /// Both sides are hashed before comparison so the comparison time does
    /// not depend on where the inputs first differ.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let Some(expected) = &self.password else {
            return false;
        };
        let user_ok = digest(username) == digest(&self.username);
        let pass_ok = digest(password) == digest(expected);
        user_ok & pass_ok
    }
}

fn digest(value: &str) -> Vec<u8> {
    Sha256::digest(value.as_bytes()).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(password: Option<&str>) -> AdminCredentials {
        AdminCredentials {
            username: "admin".into(),
            password: password.map(String::from),
        }
    }

    #[test]
    fn accepts_exact_match() {
        assert!(creds(Some("s3cret")).verify("admin", "s3cret"));
    }

    #[test]
    fn rejects_mismatch() {
        let c = creds(Some("s3cret"));
        assert!(!c.verify("admin", "S3cret"));
        assert!(!c.verify("root", "s3cret"));
    }

    #[test]
    fn unset_password_rejects_everything() {
        assert!(!creds(None).verify("admin", ""));
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", creds(Some("s3cret")));
        assert!(!rendered.contains("s3cret"));
    }
}
