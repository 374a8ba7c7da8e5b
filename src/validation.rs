use crate::error::AnswerError;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

/// An answer that parsed as a whole number.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Answer {
    pub value: i64,
    pub outcome: Outcome,
}

/// Check a typed answer against the expected number.
///
/// Surrounding whitespace is ignored. Anything other than an optional
/// leading minus followed by ASCII digits is `InvalidFormat`; exact equality
/// is the only correctness criterion.
pub fn validate_answer(raw: &str, expected: u32) -> Result<Answer, AnswerError> {
    let input = raw.trim();
    if input.is_empty() {
        tracing::debug!("empty answer");
        return Err(AnswerError::EmptyInput);
    }

    let digits = input.strip_prefix('-').unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        tracing::debug!("invalid answer format: {input:?}");
        return Err(AnswerError::InvalidFormat);
    }

    // well-formed but wider than i64
    let value: i64 = input.parse().map_err(|_| AnswerError::InvalidFormat)?;

    let outcome = if value == i64::from(expected) {
        Outcome::Correct
    } else {
        Outcome::Incorrect
    };
    tracing::debug!("answer {value} against {expected}: {outcome:?}");

    Ok(Answer { value, outcome })
}

/// Keep digits and a single leading minus; a misplaced or repeated minus is dropped.
pub fn sanitize_number_input(input: &str) -> String {
    let kept: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let minus_count = kept.matches('-').count();
    if minus_count > 1 || (minus_count == 1 && !kept.starts_with('-')) {
        kept.replace('-', "")
    } else {
        kept
    }
}

/// Render with thousands separators: `1234567` becomes `1,234,567`.
pub fn format_number(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
