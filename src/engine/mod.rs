pub mod curriculum;
pub mod proficiency;
