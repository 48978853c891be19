use serde::{Deserialize, Serialize};

/// Body of the backend `POST /newClient` and `POST /login` calls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
}

/// Token returned by a successful backend login.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginToken {
    pub token: String,
}

/// The backend's view of the logged-in user (`GET /profile`).
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Profile {
    #[serde(default, alias = "ID")]
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub role: String,
}
