pub use crate::model::*;

use std::collections::HashMap;

/// A builder for the answers of one respondent.
///
/// ```
/// pub use psqi_scoring::builder::Builder;
/// pub use psqi_scoring::Question;
/// # use psqi_scoring::ResponseErrors;
///
/// let mut builder = Builder::new()
///     .answer(Question::Q6, "较好")
///     .disturbances(&["无", "<1", "", "", "", "", "", "", ""]);
///
/// builder.answer_key("q5a", "1-2")?;
///
/// let response = builder.build();
/// assert_eq!(response.get(Question::Q5a), "1-2");
/// assert_eq!(response.get(Question::Q9), "");
///
/// # Ok::<(), ResponseErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _answers: HashMap<Question, String>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _answers: HashMap::new(),
        }
    }

    /// Sets the answer to a question. A previous answer is replaced.
    pub fn answer(mut self, question: Question, text: &str) -> Builder {
        self._answers.insert(question, text.to_string());
        self
    }

    /// Sets the answer to a question given by its key (`q1`, `q5a`, ...).
    pub fn answer_key(&mut self, key: &str, text: &str) -> Result<(), ResponseErrors> {
        let question =
            Question::from_key(key).ok_or_else(|| ResponseErrors::UnknownQuestion(key.to_string()))?;
        self._answers.insert(question, text.to_string());
        Ok(())
    }

    /// Sets the answers to the disturbance items 5b to 5j, in this order.
    ///
    /// Extra answers are ignored and missing ones are left untouched.
    pub fn disturbances(mut self, texts: &[&str]) -> Builder {
        for (question, text) in Question::DISTURBANCES.iter().zip(texts.iter()) {
            self._answers.insert(*question, text.to_string());
        }
        self
    }

    pub fn build(self) -> RawResponse {
        RawResponse {
            answers: self._answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key() {
        let mut builder = Builder::new();
        assert_eq!(
            builder.answer_key("q10", "x"),
            Err(ResponseErrors::UnknownQuestion("q10".to_string()))
        );
        assert_eq!(builder.answer_key("Q5J", ">=3"), Ok(()));
        assert_eq!(builder.build().get(Question::Q5j), ">=3");
    }

    #[test]
    fn disturbances_fill_in_order() {
        let response = Builder::new().disturbances(&["a", "b"]).build();
        assert_eq!(response.get(Question::Q5b), "a");
        assert_eq!(response.get(Question::Q5c), "b");
        assert_eq!(response.get(Question::Q5d), "");
        assert!(!response.is_empty());
        assert!(Builder::new().answer(Question::Q1, " ").build().is_empty());
    }
}
