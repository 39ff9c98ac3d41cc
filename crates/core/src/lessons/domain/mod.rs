pub mod lesson;
pub mod lesson_catalog;
