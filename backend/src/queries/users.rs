use chrono::Utc;
use uuid::Uuid;

use super::{from_document, from_documents, to_document};
use crate::Store;
use crate::{
    database::{Collection, Filter},
    error::{Error, Result},
    models::users::{NewUser, User},
};

/// Creates a new user. Fails with `Conflict` if the email is already registered.
pub async fn create_user(store: &Store, new_user: NewUser) -> Result<User> {
    let now = Utc::now();
    let user = User {
        id: Uuid::now_v7(),
        name: new_user.name,
        email: new_user.email,
        password_hash: new_user.password_hash,
        avatar: None,
        created_at: now,
        updated_at: now,
    };

    store
        .insert(Collection::Users, user.id, to_document(&user)?)
        .await
        .map_err(|e| match e {
            Error::Conflict(_) => Error::Conflict("Email is already registered".to_string()),
            other => other,
        })?;

    Ok(user)
}

/// Gets a single user by their ID. The user may not exist.
pub async fn get_user_by_id(store: &Store, id: Uuid) -> Result<Option<User>> {
    store
        .find_one(Collection::Users, &Filter::by_id(id))
        .await?
        .map(from_document)
        .transpose()
}

/// Gets a single user by their (normalized) email. The user may not exist.
pub async fn get_user_by_email(store: &Store, email: &str) -> Result<Option<User>> {
    store
        .find_one(Collection::Users, &Filter::all().eq("email", email))
        .await?
        .map(from_document)
        .transpose()
}

/// Loads the given users, skipping ids that no longer exist. Order follows `ids`.
pub async fn get_users_by_ids(store: &Store, ids: &[Uuid]) -> Result<Vec<User>> {
    let mut users = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(user) = get_user_by_id(store, *id).await? {
            users.push(user);
        }
    }
    Ok(users)
}

pub async fn list_users(store: &Store) -> Result<Vec<User>> {
    from_documents(store.find(Collection::Users, &Filter::all()).await?)
}

/// Persists an updated user. Fails with `NotFound` if it was deleted meanwhile.
pub async fn update_user(store: &Store, user: &User) -> Result<()> {
    let replaced = store
        .replace(Collection::Users, user.id, to_document(user)?)
        .await?;
    if !replaced {
        return Err(Error::NotFound("User not found".to_string()));
    }
    Ok(())
}

/// Deletes a user by ID. Returns whether a user was removed.
pub async fn delete_user(store: &Store, id: Uuid) -> Result<bool> {
    Ok(store.delete(Collection::Users, &Filter::by_id(id)).await? > 0)
}
