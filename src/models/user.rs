use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub stamp_key: String,         // ⇔ users.stamp_key (badge code, UNIQUE)
    pub email: String,             // ⇔ users.email (TEXT, default '')
    pub position: String,          // ⇔ users.position (TEXT, default '')
    pub department_id: Option<i64>, // ⇔ users.department_id (NULL = no department)
    pub auto_checkout_midnight: bool,
}

/// Fields accepted when registering a new user.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub stamp_key: Option<String>,
    pub email: String,
    pub position: String,
    pub department_id: Option<i64>,
    pub auto_checkout_midnight: bool,
}
