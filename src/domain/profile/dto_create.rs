use crate::domain::permissions::Role;

#[derive(Debug, Clone)]
pub struct CreateProfileDto {
    pub email: String,
    pub display_name: Option<String>,
    pub password: String,
    pub role: Option<Role>,
    pub is_active: bool,
}
