//! Literacy quiz module
//!
//! The external collaborator is asked for three questions with three options
//! each and exactly one correct option. None of that is enforced here: the
//! shape is a convention of the prompt, not an invariant of these types.

/// One answer option of a quiz question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    /// Option text, also used to identify the option
    pub text: String,

    /// Whether this option is the correct answer
    pub is_correct: bool,
}

impl QuizOption {
    /// Create a new option
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// A multiple-choice literacy question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    /// Identifier assigned by the collaborator (e.g. "q1")
    pub id: String,

    /// The question itself
    pub question_text: String,

    /// Answer options, three by convention
    pub options: Vec<QuizOption>,

    /// Short explanation of the correct answer
    pub explanation: String,
}

impl QuizQuestion {
    /// Look up an option by its exact text
    pub fn find_option(&self, text: &str) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.text == text)
    }

    /// First option flagged as correct, if any
    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.is_correct)
    }

    /// Number of options flagged as correct
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|option| option.is_correct).count()
    }
}

/// A non-empty, ordered batch of quiz questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizBatch {
    questions: Vec<QuizQuestion>,
}

impl QuizBatch {
    /// Create a batch; returns `None` when `questions` is empty
    pub fn new(questions: Vec<QuizQuestion>) -> Option<Self> {
        if questions.is_empty() {
            None
        } else {
            Some(Self { questions })
        }
    }

    /// Number of questions (always at least one)
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; present for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at `index`
    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    /// Whether `index` is the last question of the batch
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.questions.len()
    }

    /// All questions in order
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }
}
