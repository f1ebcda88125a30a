use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKey {
    Gold,
    Level,
    Mana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareOp {
    AtLeast,
    Above,
}

/// Parsed form of one condition expression. Anything outside the known
/// grammar is `Unknown`, which always evaluates to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConditionTest {
    Stat {
        stat: StatKey,
        op: CompareOp,
        amount: i32,
    },
    HasItem {
        name: String,
    },
    Unknown,
}

/// A condition with its original expression text preserved for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    pub raw: String,
    pub test: ConditionTest,
}

impl ConditionRecord {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let test = parse_test(&raw);
        Self { raw, test }
    }
}

fn stat_condition_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(gold|level|mana)(>=|>)(-?\d+)$")
            .expect("stat condition regex must compile")
    })
}

fn parse_test(raw: &str) -> ConditionTest {
    if let Some(name) = raw.strip_prefix("hasitem:") {
        return ConditionTest::HasItem {
            name: name.to_string(),
        };
    }

    let Some(captures) = stat_condition_regex().captures(raw) else {
        return ConditionTest::Unknown;
    };
    let stat = match &captures[1] {
        "gold" => StatKey::Gold,
        "level" => StatKey::Level,
        _ => StatKey::Mana,
    };
    let op = match &captures[2] {
        ">=" => CompareOp::AtLeast,
        _ => CompareOp::Above,
    };
    let Ok(amount) = captures[3].parse::<i32>() else {
        return ConditionTest::Unknown;
    };
    ConditionTest::Stat { stat, op, amount }
}
