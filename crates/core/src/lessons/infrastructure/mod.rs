pub mod json_lesson_source;
