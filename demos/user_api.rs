//! Sample annotated API surface used as generator input.
//!
//! Regenerate the companion file with:
//!
//! ```bash
//! apigen demos/user_api.rs demos/user_api_gen.rs
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use apigen::dispatcher::ApiError;
use apigen_macros::ApiArgs;
use serde::Serialize;

#[derive(Debug, Default, ApiArgs)]
pub struct ProfileParams {
    #[apivalidator("required")]
    pub login: String,
}

#[derive(Debug, Default, ApiArgs)]
pub struct CreateParams {
    #[apivalidator("required, min=10")]
    pub login: String,
    #[apivalidator("paramname=full_name")]
    pub name: String,
    #[apivalidator("enum=user|moderator|admin, default=user")]
    pub status: String,
    #[apivalidator("min=0, max=128")]
    pub age: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub status: i64,
}

#[derive(Debug, Serialize)]
pub struct NewUser {
    pub id: u64,
}

#[derive(Default)]
pub struct MyApi {
    users: Mutex<HashMap<String, User>>,
}

impl MyApi {
    /// apigen:api {"url": "/user/profile", "auth": false}
    pub fn profile(&self, params: ProfileParams) -> Result<User, ApiError> {
        let users = self
            .users
            .lock()
            .map_err(|e| ApiError::internal(e.to_string()))?;
        users
            .get(&params.login)
            .cloned()
            .ok_or_else(|| ApiError::new(404, "user not exist"))
    }

    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(&self, params: CreateParams) -> Result<NewUser, ApiError> {
        let mut users = self
            .users
            .lock()
            .map_err(|e| ApiError::internal(e.to_string()))?;
        if users.contains_key(&params.login) {
            return Err(ApiError::new(409, format!("user {} exist", params.login)));
        }
        let id = 42 + users.len() as u64;
        users.insert(
            params.login.clone(),
            User {
                id,
                login: params.login,
                full_name: params.name,
                status: status_rank(&params.status),
            },
        );
        Ok(NewUser { id })
    }
}

fn status_rank(status: &str) -> i64 {
    match status {
        "admin" => 30,
        "moderator" => 20,
        _ => 10,
    }
}

#[derive(Debug, Default, ApiArgs)]
pub struct OtherCreateParams {
    #[apivalidator("required, min=3")]
    pub username: String,
    #[apivalidator("paramname=account_name")]
    pub name: String,
    #[apivalidator("enum=warrior|sorcerer|rouge, default=warrior")]
    pub class: String,
    #[apivalidator("min=1, max=50")]
    pub level: i64,
}

#[derive(Debug, Serialize)]
pub struct OtherUser {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub level: i64,
}

#[derive(Default)]
pub struct OtherApi;

impl OtherApi {
    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(&self, params: OtherCreateParams) -> Result<OtherUser, ApiError> {
        Ok(OtherUser {
            id: 12,
            login: params.username,
            full_name: params.name,
            level: params.level,
        })
    }
}
