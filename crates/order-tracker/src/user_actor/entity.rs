//! [`ActorEntity`] implementation for [`User`].

use super::UserError;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use tracker_actor::ActorEntity;

fn validate_username(username: &str) -> Result<(), UserError> {
    if username.trim().is_empty() {
        return Err(UserError::ValidationError("username must not be empty".into()));
    }
    Ok(())
}

fn validate_email(email: Option<&str>) -> Result<(), UserError> {
    match email {
        Some(email) if !email.trim().is_empty() && !email.contains('@') => Err(
            UserError::ValidationError(format!("not an e-mail address: {email}")),
        ),
        _ => Ok(()),
    }
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        validate_username(&params.username)?;
        validate_email(params.email.as_deref())?;
        Ok(Self {
            id,
            username: params.username,
            email: params.email,
        })
    }

    /// # Fields Updated
    /// - `username`: must stay non-empty
    /// - `email`: an empty string clears it
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(username) = update.username {
            validate_username(&username)?;
            self.username = username;
        }
        if let Some(email) = update.email {
            validate_email(Some(&email))?;
            self.email = (!email.trim().is_empty()).then_some(email);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_username_and_malformed_email() {
        let blank = User::from_create_params(
            UserId(1),
            UserCreate {
                username: " ".into(),
                email: None,
            },
        );
        assert!(matches!(blank, Err(UserError::ValidationError(_))));

        let malformed = User::from_create_params(
            UserId(1),
            UserCreate {
                username: "alice".into(),
                email: Some("alice.example.com".into()),
            },
        );
        assert!(matches!(malformed, Err(UserError::ValidationError(_))));
    }

    #[tokio::test]
    async fn empty_email_update_clears_the_address() {
        let mut user = User::from_create_params(
            UserId(1),
            UserCreate {
                username: "alice".into(),
                email: Some("alice@example.com".into()),
            },
        )
        .unwrap();

        user.on_update(
            UserUpdate {
                username: None,
                email: Some(String::new()),
            },
            &(),
        )
        .await
        .unwrap();

        assert_eq!(user.email, None);
        assert_eq!(user.username, "alice");
    }
}
