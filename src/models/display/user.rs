//! User profile display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{id_text, or_na};
use crate::client::models::UserProfile;

/// User display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "USER ID")]
    pub id: String,

    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "ROLE")]
    pub role: String,
}

impl From<&UserProfile> for UserDisplay {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: id_text(user.id.as_ref()),
            username: user.username.clone(),
            name: user.display_name().to_string(),
            email: or_na(user.email.as_deref()),
            role: or_na(user.role.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_display_without_full_name() {
        let user: UserProfile = serde_json::from_value(json!({
            "id": 3,
            "username": "officer1",
            "role": "admin"
        }))
        .unwrap();

        let display = UserDisplay::from(&user);

        assert_eq!(display.id, "3");
        assert_eq!(display.name, "officer1");
        assert_eq!(display.email, "N/A");
        assert_eq!(display.role, "admin");
    }
}
