pub mod personal_info;
pub mod style_option;
