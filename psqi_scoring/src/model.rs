// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The questions of the PSQI form that take part in the scoring.
///
/// Question 5 is split into its ten sub-items: `Q5a` feeds the sleep latency
/// component, `Q5b` to `Q5j` feed the sleep disturbances component.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Question {
    /// Usual bed time.
    Q1,
    /// Minutes needed to fall asleep.
    Q2,
    /// Usual getting up time.
    Q3,
    /// Hours of actual sleep per night.
    Q4,
    Q5a,
    Q5b,
    Q5c,
    Q5d,
    Q5e,
    Q5f,
    Q5g,
    Q5h,
    Q5i,
    Q5j,
    /// Self-rated overall sleep quality.
    Q6,
    /// Medicine taken to help sleep.
    Q7,
    /// Trouble staying awake during daytime activities.
    Q8,
    /// Problem keeping up enthusiasm.
    Q9,
}

impl Question {
    pub const ALL: [Question; 18] = [
        Question::Q1,
        Question::Q2,
        Question::Q3,
        Question::Q4,
        Question::Q5a,
        Question::Q5b,
        Question::Q5c,
        Question::Q5d,
        Question::Q5e,
        Question::Q5f,
        Question::Q5g,
        Question::Q5h,
        Question::Q5i,
        Question::Q5j,
        Question::Q6,
        Question::Q7,
        Question::Q8,
        Question::Q9,
    ];

    /// The sub-items that make up the sleep disturbances component.
    pub const DISTURBANCES: [Question; 9] = [
        Question::Q5b,
        Question::Q5c,
        Question::Q5d,
        Question::Q5e,
        Question::Q5f,
        Question::Q5g,
        Question::Q5h,
        Question::Q5i,
        Question::Q5j,
    ];

    /// The lowercase key of the question, for example `q5a`.
    pub fn key(&self) -> &'static str {
        match self {
            Question::Q1 => "q1",
            Question::Q2 => "q2",
            Question::Q3 => "q3",
            Question::Q4 => "q4",
            Question::Q5a => "q5a",
            Question::Q5b => "q5b",
            Question::Q5c => "q5c",
            Question::Q5d => "q5d",
            Question::Q5e => "q5e",
            Question::Q5f => "q5f",
            Question::Q5g => "q5g",
            Question::Q5h => "q5h",
            Question::Q5i => "q5i",
            Question::Q5j => "q5j",
            Question::Q6 => "q6",
            Question::Q7 => "q7",
            Question::Q8 => "q8",
            Question::Q9 => "q9",
        }
    }

    /// Finds a question from its key. The lookup is case-insensitive.
    pub fn from_key(key: &str) -> Option<Question> {
        let k = key.trim().to_lowercase();
        Question::ALL.iter().find(|q| q.key() == k).cloned()
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The raw answers of one respondent, as found in the input cells.
///
/// A question that was not answered reads as the empty string. There is no
/// difference between a missing answer and an empty one for the scoring.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawResponse {
    pub(crate) answers: HashMap<Question, String>,
}

impl RawResponse {
    pub fn get(&self, question: Question) -> &str {
        self.answers
            .get(&question)
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.answers.values().all(|s| s.trim().is_empty())
    }
}

/// Errors raised while assembling a response.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ResponseErrors {
    UnknownQuestion(String),
}

impl Error for ResponseErrors {}

impl Display for ResponseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseErrors::UnknownQuestion(key) => write!(f, "unknown question key {:?}", key),
        }
    }
}

// ******** Parsed quantities *********

/// How often something happened during the past month.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Frequency {
    NotDuringPastMonth,
    LessThanOnceAWeek,
    OnceOrTwiceAWeek,
    ThreeOrMoreTimesAWeek,
}

impl Frequency {
    pub fn score(&self) -> u32 {
        match self {
            Frequency::NotDuringPastMonth => 0,
            Frequency::LessThanOnceAWeek => 1,
            Frequency::OnceOrTwiceAWeek => 2,
            Frequency::ThreeOrMoreTimesAWeek => 3,
        }
    }
}

/// A wall clock time, without any date.
///
/// The fields are not validated: "25点" yields an hour of 25. They are only
/// used in minute arithmetic.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub fn minute_of_day(&self) -> i64 {
        (self.hour as i64) * 60 + (self.minute as i64)
    }
}

// ******** Output data structures *********

/// The seven components of the index.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Component {
    SleepQuality,
    SleepLatency,
    SleepDuration,
    SleepEfficiency,
    SleepDisturbances,
    MedicationUse,
    DaytimeDysfunction,
}

impl Component {
    pub const ALL: [Component; 7] = [
        Component::SleepQuality,
        Component::SleepLatency,
        Component::SleepDuration,
        Component::SleepEfficiency,
        Component::SleepDisturbances,
        Component::MedicationUse,
        Component::DaytimeDysfunction,
    ];

    /// The column label used in the exported results.
    pub fn label(&self) -> &'static str {
        match self {
            Component::SleepQuality => "C1_SleepQuality",
            Component::SleepLatency => "C2_SleepLatency",
            Component::SleepDuration => "C3_SleepDuration",
            Component::SleepEfficiency => "C4_SleepEfficiency",
            Component::SleepDisturbances => "C5_SleepDisturbances",
            Component::MedicationUse => "C6_MedicationUse",
            Component::DaytimeDysfunction => "C7_DaytimeDysfunction",
        }
    }

    fn index(&self) -> usize {
        match self {
            Component::SleepQuality => 0,
            Component::SleepLatency => 1,
            Component::SleepDuration => 2,
            Component::SleepEfficiency => 3,
            Component::SleepDisturbances => 4,
            Component::MedicationUse => 5,
            Component::DaytimeDysfunction => 6,
        }
    }
}

/// Label of the total score column.
pub const TOTAL_LABEL: &str = "TotalScore";

/// The score of a single component, always between 0 and 3.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd, Default)]
pub struct ComponentScore(u8);

impl ComponentScore {
    pub const MIN: ComponentScore = ComponentScore(0);
    pub const MAX: ComponentScore = ComponentScore(3);

    /// Values above 3 are clamped.
    pub fn new(value: u32) -> ComponentScore {
        ComponentScore(value.min(3) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// The seven component scores of one respondent.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct PsqiScores {
    components: [ComponentScore; 7],
}

impl PsqiScores {
    pub fn from_components(components: [ComponentScore; 7]) -> PsqiScores {
        PsqiScores { components }
    }

    pub fn get(&self, component: Component) -> ComponentScore {
        self.components[component.index()]
    }

    /// The global PSQI score, between 0 and 21.
    pub fn total(&self) -> u8 {
        self.components.iter().map(|c| c.value()).sum()
    }

    /// The components in their canonical order, C1 to C7.
    pub fn iter(&self) -> impl Iterator<Item = (Component, ComponentScore)> + '_ {
        Component::ALL.iter().map(|c| (*c, self.get(*c)))
    }
}
