use std::collections::HashSet;

use crate::state::registry::PlayerId;

/// Prompt used for every question generated from a song list.
pub const SONG_QUESTION_TEXT: &str = "What is the name of this song?";

/// Immutable multiple-choice question served to every connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Prompt displayed to players.
    pub text: String,
    /// Ordered answer options.
    pub options: Vec<String>,
    /// Option value that scores points.
    pub correct_answer: String,
}

impl Question {
    /// Build a question from its prompt, options, and the correct option value.
    pub fn new(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }

    /// Whether `answer` is exactly the correct option.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

/// Turn a song list into "name that song" questions, one per song, each offering the whole list.
pub fn questions_from_songs(songs: &[String]) -> Vec<Question> {
    songs
        .iter()
        .map(|song| Question::new(SONG_QUESTION_TEXT, songs.iter().cloned(), song.clone()))
        .collect()
}

/// Question sequence and per-question submission tracking for the running quiz.
///
/// `current_index` always points at the next question to emit, so the outstanding question
/// lives at `current_index - 1`.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    submitted: HashSet<PlayerId>,
}

impl QuizSession {
    /// Create a session over the given question sequence.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
            submitted: HashSet::new(),
        }
    }

    /// Swap in a new question sequence wholesale and rewind.
    pub fn replace_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.rewind();
    }

    /// Move back to the first question and forget every submission.
    pub fn rewind(&mut self) {
        self.current_index = 0;
        self.submitted.clear();
    }

    /// All questions in order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Index of the next question to emit.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether another question remains after the outstanding one.
    pub fn has_next(&self) -> bool {
        self.current_index < self.questions.len()
    }

    /// Question players are currently answering, if one has been emitted.
    pub fn outstanding_question(&self) -> Option<&Question> {
        self.current_index
            .checked_sub(1)
            .and_then(|index| self.questions.get(index))
    }

    /// Hand out the next question and move the cursor past it.
    pub fn take_next_question(&mut self) -> Option<Question> {
        let question = self.questions.get(self.current_index)?.clone();
        self.current_index += 1;
        Some(question)
    }

    /// Record that `player` answered the outstanding question. Returns `false` on a repeat.
    pub fn record_submission(&mut self, player: &str) -> bool {
        self.submitted.insert(player.to_string())
    }

    /// Number of distinct players who answered the outstanding question.
    pub fn submission_count(&self) -> usize {
        self.submitted.len()
    }

    /// Forget submissions for the outstanding question.
    pub fn clear_submissions(&mut self) {
        self.submitted.clear();
    }
}

/// Built-in question set used when no configuration overrides it.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::new("What is 2 + 2?", ["3", "4", "5", "6"], "4"),
        Question::new(
            "What is the capital of France?",
            ["Paris", "London", "Berlin", "Rome"],
            "Paris",
        ),
        Question::new(
            "Which color is created by mixing red and yellow?",
            ["Green", "Orange", "Blue", "Purple"],
            "Orange",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_next_question_walks_the_sequence() {
        let mut session = QuizSession::new(default_questions());
        assert!(session.outstanding_question().is_none());

        let first = session.take_next_question().unwrap();
        assert_eq!(first.text, "What is 2 + 2?");
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.outstanding_question(), Some(&first));

        session.take_next_question().unwrap();
        session.take_next_question().unwrap();
        assert!(!session.has_next());
        assert!(session.take_next_question().is_none());
        assert_eq!(session.current_index(), 3);
    }

    #[test]
    fn repeated_submission_is_reported() {
        let mut session = QuizSession::new(default_questions());
        session.take_next_question();

        assert!(session.record_submission("alice"));
        assert!(!session.record_submission("alice"));
        assert!(session.record_submission("bob"));
        assert_eq!(session.submission_count(), 2);

        session.clear_submissions();
        assert_eq!(session.submission_count(), 0);
    }

    #[test]
    fn replace_questions_rewinds() {
        let mut session = QuizSession::new(default_questions());
        session.take_next_question();
        session.record_submission("alice");

        session.replace_questions(vec![Question::new("Q", ["a", "b"], "a")]);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.submission_count(), 0);
        assert_eq!(session.questions().len(), 1);
    }

    #[test]
    fn song_questions_offer_every_song() {
        let songs = vec!["Song A".to_string(), "Song B".to_string()];
        let questions = questions_from_songs(&songs);

        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.text == SONG_QUESTION_TEXT));
        assert!(questions.iter().all(|q| q.options == songs));
        assert_eq!(questions[1].correct_answer, "Song B");
    }
}
