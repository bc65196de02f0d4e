use crate::api::ApiError;
use crate::model::User;
use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Erreurs par champ de formulaire (`{"email": "...", "password": "..."}`).
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Contrôles locaux avant envoi (champs requis, format d'email).
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.insert("password".into(), "Password is required".into());
        }
        check_result(errors)
    }
}

/// Inscription (`POST /api/register`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
    pub zone: Zone,
}

impl Registration {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name".into(), "Name is required".into());
        }
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.insert("password".into(), "Password is required".into());
        }
        check_result(errors)
    }
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    let email = email.trim();
    if email.is_empty() {
        errors.insert("email".into(), "Email is required".into());
    } else if !email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
    {
        errors.insert("email".into(), "Email is invalid".into());
    }
}

fn check_result(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Réponse brute des endpoints d'authentification. Selon la version du serveur :
/// `{token, user}`, `{success, token, message}` ou `{errors}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthReply {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Authentification réussie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSuccess {
    pub token: String,
    pub user: Option<User>,
}

impl AuthReply {
    pub fn into_result(self) -> Result<AuthSuccess, ApiError> {
        let errors: FieldErrors = self
            .errors
            .unwrap_or_default()
            .into_iter()
            .filter(|(_, msg)| !msg.trim().is_empty())
            .collect();
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        if self.success == Some(false) {
            return Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Registration failed".into()),
            ));
        }
        match self.token {
            Some(token) if !token.is_empty() => Ok(AuthSuccess {
                token,
                user: self.user,
            }),
            _ => Err(ApiError::Rejected(
                self.message
                    .unwrap_or_else(|| "no token in authentication response".into()),
            )),
        }
    }
}
