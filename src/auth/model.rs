use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
///
/// Deliberately not `Serialize`: rows leave the auth module only as
/// [`PublicUser`], so the hash cannot end up in a response by accident.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_never_serializes_the_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
            name: None,
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: OffsetDateTime::now_utc(),
        };

        let public: PublicUser = user.into();
        let json = serde_json::to_value(&public).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("password_hash"));
        assert!(!obj.contains_key("password"));
        assert_eq!(obj["username"], "alice");
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let public = PublicUser {
            id: Uuid::new_v4(),
            username: "bob".to_string(),
            email: None,
            name: None,
            created_at: OffsetDateTime::now_utc(),
        };

        let json = serde_json::to_value(&public).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("email"));
        assert!(!obj.contains_key("name"));
    }
}
