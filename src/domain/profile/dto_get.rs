use crate::domain::permissions::Role;

#[derive(Debug, Clone)]
pub struct GetProfilesDto {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
}
