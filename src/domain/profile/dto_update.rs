#[derive(Debug, Clone, Default)]
pub struct UpdateProfileDto {
    pub email: Option<String>,
    pub display_name: Option<String>,
}
