use serde::{Deserialize, Serialize};

/// Domain used for generated email addresses.
pub const EMAIL_DOMAIN: &str = "testplatform.com";

/// Length of the random suffix in generated emails.
pub const SUFFIX_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    /// Display name used in check names ("Admin Signup", "Teacher Login").
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }

    /// Key of this role's credentials in the data bag.
    pub fn key(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    fn password(self) -> &'static str {
        match self {
            Role::Admin => "admin123",
            Role::Teacher => "teacher123",
            Role::Student => "student123",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Teacher => write!(f, "TEACHER"),
            Role::Student => write!(f, "STUDENT"),
        }
    }
}

/// Signup payload; kept afterwards so the same account can log in again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Credentials {
    /// Fresh credentials for `role` with a unique email.
    pub fn generate(role: Role) -> Self {
        Self {
            name: format!("Test {}", role.label()),
            email: generate_email(role.key()),
            password: role.password().to_string(),
            role,
        }
    }

    pub fn login(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Name-only student login scoped to a room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomLoginRequest {
    pub name: String,
    pub room_id: String,
}

/// Body of the admin-only `POST /teachers`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewTeacher {
    pub fn generate() -> Self {
        Self {
            name: "Admin Created Teacher".to_string(),
            email: generate_email("admin_teacher"),
            password: "teacher456".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTeacher {
    #[serde(rename = "teacherId", deserialize_with = "super::id::deserialize")]
    pub teacher_id: String,
}

/// User as returned by `/auth/me` and login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    #[serde(default, rename = "_id", deserialize_with = "super::id::deserialize_opt")]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Kept as text so roles this client does not know still decode.
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.role.as_deref() == Some(role.to_string().as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub user: Option<User>,
}

/// `{prefix}_{suffix}@testplatform.com` with a random lowercase alphanumeric suffix.
pub fn generate_email(prefix: &str) -> String {
    format!("{prefix}_{}@{EMAIL_DOMAIN}", random_suffix())
}

pub fn random_suffix() -> String {
    uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect()
}
