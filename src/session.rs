use crate::api::HttpApi;
use crate::model::{User, UserId};
use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Niveau d'accès requis par une vue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Member,
    Admin,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("not logged in, run `login` first")]
    NotLoggedIn,
    #[error("administrator access required")]
    NotAdmin,
    #[error("session user id is missing")]
    MissingUserId,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Session explicite : identité + jeton, transmise aux vues au lieu d'être relue partout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    pub fn zone(&self) -> Zone {
        self.user.zone
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }

    /// Vérifie l'accès avant d'entrer dans une vue protégée.
    pub fn authorize(&self, access: Access) -> Result<(), SessionError> {
        if self.token.is_empty() {
            return Err(SessionError::NotLoggedIn);
        }
        if self.user.id.as_str().is_empty() {
            return Err(SessionError::MissingUserId);
        }
        if access == Access::Admin && !self.user.is_admin {
            tracing::warn!(user = %self.user.id, "unauthorized admin access");
            return Err(SessionError::NotAdmin);
        }
        Ok(())
    }

    /// Client API authentifié avec le jeton de la session.
    pub fn api(&self, base: &HttpApi) -> HttpApi {
        base.clone().with_token(self.token.clone())
    }
}
