use serde::Serialize;

/// Qualitative band for an average on the 0-20 scale.
///
/// | Average | Band         |
/// |---------|--------------|
/// | >= 18   | Outstanding  |
/// | >= 16   | Excellent    |
/// | >= 14   | VeryGood     |
/// | >= 12   | Good         |
/// | >= 10   | Pass         |
/// | >= 8    | Borderline   |
/// | >= 6    | Insufficient |
/// | >= 4    | Weak         |
/// | < 4     | Failing      |
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Evaluation {
    Outstanding,
    Excellent,
    VeryGood,
    Good,
    Pass,
    Borderline,
    Insufficient,
    Weak,
    Failing,
}

impl Evaluation {
    pub fn for_average(average: f64) -> Self {
        match average {
            a if a >= 18.0 => Evaluation::Outstanding,
            a if a >= 16.0 => Evaluation::Excellent,
            a if a >= 14.0 => Evaluation::VeryGood,
            a if a >= 12.0 => Evaluation::Good,
            a if a >= 10.0 => Evaluation::Pass,
            a if a >= 8.0 => Evaluation::Borderline,
            a if a >= 6.0 => Evaluation::Insufficient,
            a if a >= 4.0 => Evaluation::Weak,
            _ => Evaluation::Failing,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Evaluation::Outstanding => "Outstanding work, top of the scale.",
            Evaluation::Excellent => "Excellent results across the board.",
            Evaluation::VeryGood => "Very good, keep it up.",
            Evaluation::Good => "Good, steady progress.",
            Evaluation::Pass => "Passed, the line is crossed.",
            Evaluation::Borderline => "Borderline, a little more effort gets you there.",
            Evaluation::Insufficient => "Insufficient, time to catch up.",
            Evaluation::Weak => "Weak, but nothing is lost yet.",
            Evaluation::Failing => "Failing. Every setback is a lesson.",
        }
    }
}
