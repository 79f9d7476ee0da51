use validator::Validate;

use crate::config::ServerConfig;
use crate::forms::auth::LoginForm;
use crate::services::{ServiceError, ServiceResult};

/// Checks the submitted credentials against the configured admin account and
/// returns the identity to store in the session.
pub fn login(config: &ServerConfig, form: &LoginForm) -> ServiceResult<String> {
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if form.username == config.admin_username && form.password == config.admin_password {
        Ok(form.username.clone())
    } else {
        Err(ServiceError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            admin_username: "admin".to_string(),
            admin_password: "secreto".to_string(),
        }
    }

    #[test]
    fn login_accepts_the_configured_credentials() {
        let form = LoginForm {
            username: "admin".to_string(),
            password: "secreto".to_string(),
        };

        let result = login(&config(), &form);

        assert_eq!(result.expect("expected success"), "admin");
    }

    #[test]
    fn login_rejects_a_wrong_password() {
        let form = LoginForm {
            username: "admin".to_string(),
            password: "adivinado".to_string(),
        };

        let result = login(&config(), &form);

        assert!(matches!(result, Err(ServiceError::InvalidCredentials)));
    }

    #[test]
    fn login_rejects_an_empty_form() {
        let form = LoginForm {
            username: String::new(),
            password: String::new(),
        };

        let result = login(&config(), &form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
