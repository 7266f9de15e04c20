// src/store.rs

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::{
    error::QuizError,
    models::{
        attempt::{AnswerCheck, Attempt, Stats},
        category::Category,
        question::{PublicQuestion, Question},
    },
};

/// Pairs a category's bank with its attempt history.
#[derive(Debug, Default)]
struct Bucket {
    questions: Vec<Question>,
    attempts: Vec<Attempt>,
}

impl Bucket {
    /// Linear scan; the first question with a matching id wins.
    fn find(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// In-memory quiz data, one locked bucket per category.
///
/// The category map is built once in [`QuizStore::new`] and never changes shape,
/// so only the buckets themselves need locking.
#[derive(Debug)]
pub struct QuizStore {
    buckets: HashMap<Category, Mutex<Bucket>>,
}

impl QuizStore {
    /// Creates a store with an empty bucket for every category.
    pub fn new() -> Self {
        let buckets = Category::ALL
            .into_iter()
            .map(|category| (category, Mutex::new(Bucket::default())))
            .collect();
        Self { buckets }
    }

    fn bucket(&self, category: &str) -> Result<&Mutex<Bucket>, QuizError> {
        let category: Category = category.parse()?;
        self.buckets
            .get(&category)
            .ok_or(QuizError::InvalidCategory)
    }

    /// All configured category names, whether or not their bank loaded.
    pub fn list_categories(&self) -> Vec<&'static str> {
        Category::ALL.iter().map(Category::as_str).collect()
    }

    /// Questions of a category with their answers stripped.
    pub fn list_questions(&self, category: &str) -> Result<Vec<PublicQuestion>, QuizError> {
        let bucket = self.bucket(category)?.lock();
        Ok(bucket.questions.iter().map(PublicQuestion::from).collect())
    }

    /// Looks up a question of the current bank by id.
    pub fn find_question(&self, category: &str, question_id: &str) -> Result<Question, QuizError> {
        let bucket = self.bucket(category)?.lock();
        bucket
            .find(question_id)
            .cloned()
            .ok_or(QuizError::QuestionNotFound)
    }

    /// Checks `user_answer` against the stored answer and records the attempt.
    ///
    /// Comparison is exact: case-sensitive, no trimming.
    pub fn check_and_record(
        &self,
        category: &str,
        question_id: &str,
        user_answer: &str,
        time_taken: Option<f64>,
    ) -> Result<AnswerCheck, QuizError> {
        let mut bucket = self.bucket(category)?.lock();

        let question = bucket
            .find(question_id)
            .ok_or(QuizError::QuestionNotFound)?;
        let correct = user_answer == question.answer;
        let check = AnswerCheck {
            correct,
            correct_answer: question.answer.clone(),
        };
        let attempt = Attempt {
            question_text: question.question.clone(),
            is_correct: correct,
            time_taken: time_taken.unwrap_or(0.0),
        };

        bucket.attempts.push(attempt);
        Ok(check)
    }

    /// Tallies the attempts recorded for a category.
    pub fn compute_stats(&self, category: &str) -> Result<Stats, QuizError> {
        let bucket = self.bucket(category)?.lock();
        if bucket.attempts.is_empty() {
            return Err(QuizError::NoAttempts);
        }
        Ok(Stats::from_attempts(&bucket.attempts))
    }

    /// Snapshot of a category's attempt history, oldest first.
    #[cfg(test)]
    pub(crate) fn attempts(&self, category: &str) -> Result<Vec<Attempt>, QuizError> {
        let bucket = self.bucket(category)?.lock();
        Ok(bucket.attempts.clone())
    }

    /// Swaps in a freshly loaded bank. Recorded attempts are kept.
    pub fn replace_questions(&self, category: Category, questions: Vec<Question>) {
        if let Some(bucket) = self.buckets.get(&category) {
            bucket.lock().questions = questions;
        }
    }

    #[cfg(test)]
    pub(crate) fn question_count(&self, category: Category) -> usize {
        self.buckets
            .get(&category)
            .map_or(0, |bucket| bucket.lock().questions.len())
    }
}

impl Default for QuizStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, text: &str, answer: &str) -> Question {
        Question {
            id: id.to_string(),
            question: text.to_string(),
            options: vec![
                answer.to_string(),
                "distractor one".to_string(),
                "distractor two".to_string(),
                "distractor three".to_string(),
            ],
            answer: answer.to_string(),
        }
    }

    fn java_store() -> QuizStore {
        let store = QuizStore::new();
        store.replace_questions(
            Category::Java,
            vec![
                question("java_0", "What runs Java bytecode?", "JVM"),
                question("java_1", "Keyword for inheritance?", "extends"),
            ],
        );
        store
    }

    #[test]
    fn lists_every_category_even_when_empty() {
        let store = QuizStore::new();
        assert_eq!(store.list_categories(), ["java", "c", "python", "gk"]);
        assert!(store.list_questions("gk").unwrap().is_empty());
    }

    #[test]
    fn listed_questions_never_carry_answers() {
        let store = java_store();
        let listed = store.list_questions("java").unwrap();
        assert_eq!(listed.len(), 2);
        for q in &listed {
            let json = serde_json::to_value(q).unwrap();
            assert!(json.get("answer").is_none());
            assert_eq!(q.options.len(), 4);
        }
    }

    #[test]
    fn category_lookup_folds_case() {
        let store = java_store();
        assert_eq!(store.list_questions("JAVA").unwrap().len(), 2);
        assert!(store.check_and_record("Java", "java_0", "JVM", None).unwrap().correct);
    }

    #[test]
    fn unknown_category_is_rejected_everywhere() {
        let store = java_store();
        assert_eq!(store.list_questions("rust"), Err(QuizError::InvalidCategory));
        assert_eq!(
            store.check_and_record("rust", "java_0", "JVM", None),
            Err(QuizError::InvalidCategory)
        );
        assert_eq!(store.compute_stats("rust"), Err(QuizError::InvalidCategory));
        assert_eq!(store.compute_stats(""), Err(QuizError::InvalidCategory));
    }

    #[test]
    fn correct_answer_is_recognised() {
        let store = java_store();
        let check = store.check_and_record("java", "java_0", "JVM", Some(3.5)).unwrap();
        assert!(check.correct);
        assert_eq!(check.correct_answer, "JVM");

        let attempts = store.attempts("java").unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].question_text, "What runs Java bytecode?");
        assert_eq!(attempts[0].time_taken, 3.5);
    }

    #[test]
    fn comparison_is_exact() {
        let store = java_store();
        for answer in ["jvm", " JVM", "JVM ", ""] {
            let check = store.check_and_record("java", "java_0", answer, None).unwrap();
            assert!(!check.correct, "{answer:?} should not match");
            assert_eq!(check.correct_answer, "JVM");
        }
    }

    #[test]
    fn missing_time_defaults_to_zero() {
        let store = java_store();
        store.check_and_record("java", "java_1", "implements", None).unwrap();
        assert_eq!(store.attempts("java").unwrap()[0].time_taken, 0.0);
    }

    #[test]
    fn unknown_question_records_nothing() {
        let store = java_store();
        assert_eq!(
            store.check_and_record("java", "java_999", "JVM", None),
            Err(QuizError::QuestionNotFound)
        );
        assert_eq!(store.compute_stats("java"), Err(QuizError::NoAttempts));
    }

    #[test]
    fn duplicate_ids_resolve_to_the_first_match() {
        let store = QuizStore::new();
        store.replace_questions(
            Category::C,
            vec![
                question("c_0", "First", "alpha"),
                question("c_0", "Second", "beta"),
            ],
        );
        let check = store.check_and_record("c", "c_0", "beta", None).unwrap();
        assert!(!check.correct);
        assert_eq!(check.correct_answer, "alpha");
        assert_eq!(store.find_question("c", "c_0").unwrap().question, "First");
    }

    #[test]
    fn stats_require_attempts() {
        let store = java_store();
        assert_eq!(store.compute_stats("java"), Err(QuizError::NoAttempts));
    }

    #[test]
    fn stats_add_up_to_the_number_of_submissions() {
        let store = java_store();
        let submissions = [
            ("java_0", "JVM"),
            ("java_0", "CLR"),
            ("java_1", "extends"),
            ("java_1", "inherits"),
            ("java_1", "extends"),
        ];
        for (id, answer) in submissions {
            store.check_and_record("java", id, answer, None).unwrap();
        }

        let stats = store.compute_stats("java").unwrap();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.correct, 3);
        assert_eq!(stats.incorrect, 2);
        assert_eq!(stats.correct + stats.incorrect, stats.total);
    }

    #[test]
    fn attempts_are_per_category() {
        let store = java_store();
        store.check_and_record("java", "java_0", "JVM", None).unwrap();
        assert_eq!(store.compute_stats("c"), Err(QuizError::NoAttempts));
    }

    #[test]
    fn replacing_questions_keeps_attempt_history() {
        let store = java_store();
        store.check_and_record("java", "java_0", "JVM", None).unwrap();

        store.replace_questions(Category::Java, vec![question("java_0", "New question", "new")]);

        assert_eq!(store.question_count(Category::Java), 1);
        let attempts = store.attempts("java").unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].question_text, "What runs Java bytecode?");
        assert_eq!(store.find_question("java", "java_1"), Err(QuizError::QuestionNotFound));
    }

    #[test]
    fn concurrent_submissions_are_not_lost() {
        let store = std::sync::Arc::new(java_store());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        store.check_and_record("java", "java_0", "JVM", None).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.compute_stats("java").unwrap().total, 400);
    }
}
