use super::lesson::{Lesson, LessonItem, LessonLevel};
use crate::scoring::domain::language::Language;
use crate::scoring::domain::score_result::ScoreRequest;

/// Read-only set of lessons, in catalogue order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    pub fn new(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    /// Lessons matching both filters; `None` matches everything.
    pub fn lessons(&self, language: Option<Language>, level: Option<LessonLevel>) -> Vec<&Lesson> {
        self.lessons
            .iter()
            .filter(|l| language.map_or(true, |lang| l.language == lang))
            .filter(|l| level.map_or(true, |lvl| l.level == lvl))
            .collect()
    }

    pub fn lesson(&self, lesson_id: u64) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }

    /// Items of a lesson. `None` for an unknown lesson or one without items.
    pub fn items(&self, lesson_id: u64) -> Option<&[LessonItem]> {
        self.lesson(lesson_id)
            .map(|l| l.items.as_slice())
            .filter(|items| !items.is_empty())
    }

    /// An item together with the lesson it belongs to.
    pub fn item(&self, item_id: u64) -> Option<(&Lesson, &LessonItem)> {
        self.lessons
            .iter()
            .find_map(|l| l.items.iter().find(|i| i.id == item_id).map(|i| (l, i)))
    }

    /// Builds the scoring request for a spoken attempt at an item: the
    /// item's display text is the target and its lesson's language picks
    /// the profile.
    pub fn practice_request(
        &self,
        item_id: u64,
        transcript: &str,
        confidence: f64,
    ) -> Option<ScoreRequest> {
        let (lesson, item) = self.item(item_id)?;
        Some(ScoreRequest::new(
            item.text.as_str(),
            transcript,
            confidence,
            lesson.language.tag(),
        ))
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}
