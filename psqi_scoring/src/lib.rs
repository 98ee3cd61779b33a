/*!

Scoring of the Pittsburgh Sleep Quality Index (PSQI).

The index is made of seven components, each scored between 0 and 3, computed from the
answers to the questionnaire. Their sum is the global score, between 0 and 21. Higher
scores mean worse sleep quality.

The answers are usually typed by hand, so all the functions of this crate accept
arbitrary text and fall back to a fixed default when the text cannot be understood.
None of them fails.

```
use psqi_scoring::builder::Builder;
use psqi_scoring::{score_response, Question};

let response = Builder::new()
    .answer(Question::Q1, "23点")
    .answer(Question::Q3, "6点")
    .answer(Question::Q4, "6.5小时")
    .answer(Question::Q6, "很好")
    .build();

let scores = score_response(&response);
assert_eq!(scores.total(), 1);
```

See the [manual] for the details of each component.
*/

mod model;

pub mod builder;
pub mod manual;
pub mod parse;
pub mod quick_start;

use log::debug;

pub use crate::model::*;
use crate::parse::{match_tokens, parse_frequency, parse_hours, parse_minutes, parse_time_of_day};

/// The two cut points used to bring a sum of item scores back to a component score.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct CutPoints {
    pub low: u32,
    pub high: u32,
}

const LATENCY_CUT_POINTS: CutPoints = CutPoints { low: 2, high: 4 };
const DISTURBANCES_CUT_POINTS: CutPoints = CutPoints { low: 9, high: 18 };
const DYSFUNCTION_CUT_POINTS: CutPoints = CutPoints { low: 2, high: 4 };

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Answers to question 6, best first.
const QUALITY_TOKENS: &[(u32, &[&str])] = &[
    (0, &["很好", "very good"]),
    (1, &["较好", "fairly good"]),
    (2, &["较差", "fairly bad"]),
    (3, &["很差", "very bad"]),
];

/// Answers to question 9, from no problem at all to a frequent one.
const ENTHUSIASM_TOKENS: &[(u32, &[&str])] = &[
    (0, &["无", "none"]),
    (1, &["偶尔", "occasionally"]),
    (2, &["有时", "sometimes"]),
    (3, &["经常", "frequently"]),
];

/// Brings a sum of item scores to a component score:
/// 0 stays 0, up to `low` is 1, up to `high` is 2, and 3 above.
pub fn map_sum_to_score(sum: u32, cut_points: CutPoints) -> ComponentScore {
    let score = if sum == 0 {
        0
    } else if sum <= cut_points.low {
        1
    } else if sum <= cut_points.high {
        2
    } else {
        3
    };
    ComponentScore::new(score)
}

/// C1: the self-rated sleep quality (question 6).
pub fn sleep_quality(q6: &str) -> ComponentScore {
    let s = q6.trim().to_lowercase();
    ComponentScore::new(match_tokens(&s, QUALITY_TOKENS).unwrap_or(0))
}

/// C2: the time needed to fall asleep (question 2) combined with how often
/// it took more than 30 minutes (question 5a).
pub fn sleep_latency(q2: &str, q5a: &str) -> ComponentScore {
    let latency_score = match parse_minutes(q2) {
        0..=15 => 0,
        16..=30 => 1,
        31..=60 => 2,
        _ => 3,
    };
    let frequency_score = parse_frequency(q5a).score();
    map_sum_to_score(latency_score + frequency_score, LATENCY_CUT_POINTS)
}

/// C3: the hours of actual sleep (question 4).
pub fn sleep_duration(q4: &str) -> ComponentScore {
    let hours = parse_hours(q4);
    let score = if hours > 7.0 {
        0
    } else if hours >= 6.0 {
        1
    } else if hours >= 5.0 {
        2
    } else {
        3
    };
    ComponentScore::new(score)
}

/// C4: the habitual sleep efficiency, i.e. the share of the time in bed
/// (questions 1 and 3) spent sleeping (question 4).
///
/// A wake up time at or before the bed time is read as the next day. A
/// degenerate time in bed or sleep duration gets the worst score.
pub fn sleep_efficiency(q1: &str, q3: &str, q4: &str) -> ComponentScore {
    let bed = parse_time_of_day(q1).minute_of_day();
    let mut wake = parse_time_of_day(q3).minute_of_day();
    if wake <= bed {
        wake += MINUTES_PER_DAY;
    }
    let time_in_bed = wake - bed;
    if time_in_bed <= 0 {
        debug!(
            "sleep_efficiency: no time in bed for bed time {:?} and wake time {:?}",
            q1, q3
        );
        return ComponentScore::MAX;
    }
    let actual_sleep = parse_hours(q4) * 60.0;
    if actual_sleep <= 0.0 {
        return ComponentScore::MAX;
    }
    let efficiency = actual_sleep / (time_in_bed as f64) * 100.0;
    debug!(
        "sleep_efficiency: {:.2}% ({} min asleep / {} min in bed)",
        efficiency, actual_sleep, time_in_bed
    );
    let score = if efficiency >= 85.0 {
        0
    } else if efficiency >= 75.0 {
        1
    } else if efficiency >= 65.0 {
        2
    } else {
        3
    };
    ComponentScore::new(score)
}

/// C5: the sleep disturbances (questions 5b to 5j).
pub fn sleep_disturbances<S: AsRef<str>>(items: &[S]) -> ComponentScore {
    let sum: u32 = items
        .iter()
        .map(|s| parse_frequency(s.as_ref()).score())
        .sum();
    map_sum_to_score(sum, DISTURBANCES_CUT_POINTS)
}

/// C6: the use of sleeping medication (question 7).
pub fn medication_use(q7: &str) -> ComponentScore {
    ComponentScore::new(parse_frequency(q7).score())
}

/// C7: the daytime dysfunction, from the trouble staying awake (question 8)
/// and the lack of enthusiasm (question 9).
pub fn daytime_dysfunction(q8: &str, q9: &str) -> ComponentScore {
    let sleepiness_score = parse_frequency(q8).score();
    let s = q9.trim().to_lowercase();
    let enthusiasm_score = match_tokens(&s, ENTHUSIASM_TOKENS).unwrap_or(0);
    map_sum_to_score(sleepiness_score + enthusiasm_score, DYSFUNCTION_CUT_POINTS)
}

/// Computes the seven components for the answers of one respondent.
pub fn score_response(response: &RawResponse) -> PsqiScores {
    let disturbances: Vec<&str> = Question::DISTURBANCES
        .iter()
        .map(|q| response.get(*q))
        .collect();
    let scores = PsqiScores::from_components([
        sleep_quality(response.get(Question::Q6)),
        sleep_latency(response.get(Question::Q2), response.get(Question::Q5a)),
        sleep_duration(response.get(Question::Q4)),
        sleep_efficiency(
            response.get(Question::Q1),
            response.get(Question::Q3),
            response.get(Question::Q4),
        ),
        sleep_disturbances(&disturbances),
        medication_use(response.get(Question::Q7)),
        daytime_dysfunction(response.get(Question::Q8), response.get(Question::Q9)),
    ]);
    debug!("score_response: {:?} total: {}", scores, scores.total());
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use proptest::prelude::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn score(c: ComponentScore) -> u8 {
        c.value()
    }

    #[test]
    fn map_sum_to_score_bands() {
        let cp = CutPoints { low: 2, high: 4 };
        assert_eq!(score(map_sum_to_score(0, cp)), 0);
        assert_eq!(score(map_sum_to_score(1, cp)), 1);
        assert_eq!(score(map_sum_to_score(2, cp)), 1);
        assert_eq!(score(map_sum_to_score(3, cp)), 2);
        assert_eq!(score(map_sum_to_score(4, cp)), 2);
        assert_eq!(score(map_sum_to_score(5, cp)), 3);
        assert_eq!(score(map_sum_to_score(27, DISTURBANCES_CUT_POINTS)), 3);
    }

    #[test]
    fn sleep_quality_categories() {
        assert_eq!(score(sleep_quality("很好")), 0);
        assert_eq!(score(sleep_quality(" 较好 ")), 1);
        assert_eq!(score(sleep_quality("较差")), 2);
        assert_eq!(score(sleep_quality("很差")), 3);
        assert_eq!(score(sleep_quality("Fairly bad")), 2);
        assert_eq!(score(sleep_quality("一般")), 0);
        assert_eq!(score(sleep_quality("")), 0);
    }

    #[test]
    fn sleep_latency_example() {
        init();
        assert_eq!(score(sleep_latency("10分", "1-2次/周")), 1);
        assert_eq!(score(sleep_latency("10分", "无")), 0);
        assert_eq!(score(sleep_latency("30分", ">=3次/周")), 2);
        assert_eq!(score(sleep_latency("90分钟", ">=3次/周")), 3);
        assert_eq!(score(sleep_latency("45", "<1")), 2);
        assert_eq!(score(sleep_latency("", "")), 0);
    }

    #[test]
    fn sleep_duration_boundaries() {
        assert_eq!(score(sleep_duration("7.01")), 0);
        assert_eq!(score(sleep_duration("8小时")), 0);
        assert_eq!(score(sleep_duration("7.0")), 1);
        assert_eq!(score(sleep_duration("6.99")), 1);
        assert_eq!(score(sleep_duration("6")), 1);
        assert_eq!(score(sleep_duration("5.0")), 2);
        assert_eq!(score(sleep_duration("4.99")), 3);
        assert_eq!(score(sleep_duration("")), 3);
    }

    #[test]
    fn sleep_efficiency_over_midnight() {
        init();
        // 420 minutes in bed, 390 minutes asleep: 92.86%
        assert_eq!(score(sleep_efficiency("23点", "6点", "6.5")), 0);
        // 480 minutes in bed, 360 minutes asleep: 75%
        assert_eq!(score(sleep_efficiency("22点30分", "6点30分", "6")), 1);
        // 480 minutes in bed, 330 minutes asleep: 68.75%
        assert_eq!(score(sleep_efficiency("22:00", "6:00", "5.5")), 2);
        // 600 minutes in bed, 300 minutes asleep: 50%
        assert_eq!(score(sleep_efficiency("21点", "7点", "5")), 3);
    }

    #[test]
    fn sleep_efficiency_same_day() {
        // 1:00 to 8:00, 7 hours asleep.
        assert_eq!(score(sleep_efficiency("1点", "8点", "7")), 0);
    }

    #[test]
    fn sleep_efficiency_degenerate() {
        // Same bed and wake time: a full day in bed, but no sleep.
        assert_eq!(score(sleep_efficiency("23点", "23点", "0")), 3);
        assert_eq!(score(sleep_efficiency("", "", "")), 3);
        // Out of range bed time, the wake time wraps but stays before it.
        assert_eq!(score(sleep_efficiency("30点", "1点", "7")), 3);
    }

    #[test]
    fn sleep_disturbances_extremes() {
        let empty = vec![""; 9];
        assert_eq!(score(sleep_disturbances(&empty)), 0);
        let all = vec![">=3次/周"; 9];
        assert_eq!(score(sleep_disturbances(&all)), 3);
        let mut some = vec!["无"; 9];
        some[0] = "1-2";
        some[1] = "<1";
        assert_eq!(score(sleep_disturbances(&some)), 1);
        let middle = vec!["1-2"; 9];
        assert_eq!(score(sleep_disturbances(&middle)), 2);
    }

    #[test]
    fn medication_use_is_frequency() {
        assert_eq!(score(medication_use("无")), 0);
        assert_eq!(score(medication_use("＜1次/周")), 1);
        assert_eq!(score(medication_use("1-2次/周")), 2);
        assert_eq!(score(medication_use("≥3次/周")), 3);
    }

    #[test]
    fn daytime_dysfunction_sum() {
        assert_eq!(score(daytime_dysfunction("无", "无")), 0);
        assert_eq!(score(daytime_dysfunction("<1", "偶尔")), 1);
        assert_eq!(score(daytime_dysfunction("1-2", "有时")), 2);
        assert_eq!(score(daytime_dysfunction(">=3", "经常")), 3);
        assert_eq!(score(daytime_dysfunction("", "Sometimes")), 1);
        assert_eq!(score(daytime_dysfunction("", "不清楚")), 0);
    }

    #[test]
    fn end_to_end_record() {
        init();
        let response = Builder::new()
            .answer(Question::Q1, "23点")
            .answer(Question::Q2, "10分")
            .answer(Question::Q3, "6点")
            .answer(Question::Q4, "6.5小时")
            .answer(Question::Q5a, "无")
            .disturbances(&["无"; 9])
            .answer(Question::Q6, "很好")
            .answer(Question::Q7, "无")
            .answer(Question::Q8, "无")
            .answer(Question::Q9, "无")
            .build();
        let scores = score_response(&response);
        let values: Vec<u8> = scores.iter().map(|(_, s)| s.value()).collect();
        assert_eq!(values, vec![0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(scores.get(Component::SleepDuration).value(), 1);
        assert_eq!(scores.total(), 1);
    }

    #[test]
    fn empty_record() {
        let scores = score_response(&RawResponse::default());
        // Only the duration and the efficiency penalize a missing answer.
        assert_eq!(scores.get(Component::SleepDuration).value(), 3);
        assert_eq!(scores.get(Component::SleepEfficiency).value(), 3);
        assert_eq!(scores.total(), 6);
    }

    #[test]
    fn worst_record() {
        let response = Builder::new()
            .answer(Question::Q1, "21点")
            .answer(Question::Q2, "90分")
            .answer(Question::Q3, "9点")
            .answer(Question::Q4, "3小时")
            .answer(Question::Q5a, ">=3")
            .disturbances(&[">=3"; 9])
            .answer(Question::Q6, "很差")
            .answer(Question::Q7, ">=3")
            .answer(Question::Q8, ">=3")
            .answer(Question::Q9, "经常")
            .build();
        assert_eq!(score_response(&response).total(), 21);
    }

    fn answer_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("无".to_string()),
            Just("<1".to_string()),
            Just("1-2".to_string()),
            Just(">=3".to_string()),
            Just("23点".to_string()),
            "[0-9]{1,3}(\\.[0-9])?(点|分|小时)?",
            ".{0,12}",
        ]
    }

    proptest! {
        /// Property: every component stays in range and the total is their sum.
        #[test]
        fn scores_always_in_range(answers in prop::collection::vec(answer_strategy(), 18)) {
            let mut builder = Builder::new();
            for (q, a) in Question::ALL.iter().zip(answers.iter()) {
                builder = builder.answer(*q, a.as_str());
            }
            let scores = score_response(&builder.build());
            let mut sum: u32 = 0;
            for (_, s) in scores.iter() {
                prop_assert!(s <= ComponentScore::MAX);
                sum += s.value() as u32;
            }
            prop_assert_eq!(sum, scores.total() as u32);
            prop_assert!(scores.total() <= 21);
        }

        /// Property: the threshold mapper follows its bands for any cut points.
        #[test]
        fn map_sum_to_score_contract(low in 0u32..50, gap in 0u32..50, sum in 0u32..200) {
            let cp = CutPoints { low, high: low + gap };
            let expected = if sum == 0 {
                0
            } else if sum <= cp.low {
                1
            } else if sum <= cp.high {
                2
            } else {
                3
            };
            prop_assert_eq!(map_sum_to_score(sum, cp).value(), expected);
        }

        /// Property: the frequency parser never goes beyond 3.
        #[test]
        fn frequency_is_bounded(text in ".{0,20}") {
            prop_assert!(parse_frequency(&text).score() <= 3);
        }
    }
}
