use std::collections::HashMap;

use serde_json::Value;

use crate::models::domain::Exam;

pub struct ExamAttemptService;

impl ExamAttemptService {
    /// Count of questions whose submitted choice equals the correct index.
    ///
    /// Answers are keyed by question position as a string. Missing keys,
    /// non-numeric values and indices outside the option list score nothing.
    pub fn grade(exam: &Exam, answers: &HashMap<String, Value>) -> i32 {
        exam.questions
            .iter()
            .enumerate()
            .filter(|(i, question)| {
                answers
                    .get(&i.to_string())
                    .and_then(Self::selected_index)
                    .filter(|choice| (0..question.options.len() as i64).contains(choice))
                    .is_some_and(|choice| choice == question.correct_index)
            })
            .count() as i32
    }

    /// Accepts JSON integers, integral floats and numeric strings.
    fn selected_index(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Question;
    use serde_json::json;

    fn exam_with(correct: &[i64]) -> Exam {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, c)| Question {
                question: format!("q{}", i),
                options: vec!["a".into(), "b".into(), "c".into()],
                correct_index: *c,
            })
            .collect();
        Exam::new("exam", "", 30, questions, None, "t1", "teacher")
    }

    fn answers(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_all_correct_scores_total() {
        let exam = exam_with(&[0, 1, 2, 1]);
        let score = ExamAttemptService::grade(
            &exam,
            &answers(json!({"0": 0, "1": 1, "2": 2, "3": 1})),
        );
        assert_eq!(score, exam.question_count());
    }

    #[test]
    fn test_empty_answers_score_zero() {
        let exam = exam_with(&[0, 1]);
        assert_eq!(ExamAttemptService::grade(&exam, &HashMap::new()), 0);
    }

    #[test]
    fn test_partial_and_wrong_answers() {
        let exam = exam_with(&[0, 1]);
        let score = ExamAttemptService::grade(&exam, &answers(json!({"0": 0, "1": 2})));
        assert_eq!(score, 1);
    }

    #[test]
    fn test_numeric_strings_and_integral_floats_count() {
        let exam = exam_with(&[1, 2]);
        let score = ExamAttemptService::grade(&exam, &answers(json!({"0": "1", "1": 2.0})));
        assert_eq!(score, 2);
    }

    #[test]
    fn test_non_numeric_and_fractional_values_are_ignored() {
        let exam = exam_with(&[1, 1, 1]);
        let score = ExamAttemptService::grade(
            &exam,
            &answers(json!({"0": "one", "1": 1.5, "2": null})),
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn test_keys_outside_question_range_are_ignored() {
        let exam = exam_with(&[0]);
        let score = ExamAttemptService::grade(&exam, &answers(json!({"5": 0, "-1": 0})));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_out_of_range_correct_index_never_matches_real_options() {
        let exam = exam_with(&[9]);
        for choice in 0..3 {
            let score = ExamAttemptService::grade(&exam, &answers(json!({"0": choice})));
            assert_eq!(score, 0);
        }

        let score = ExamAttemptService::grade(&exam, &answers(json!({"0": 9})));
        assert_eq!(score, 0);
    }
}
