//! Branch selection for pluralized choice messages.
//!
//! A choice message is a `|`-separated list of branches. Each branch may
//! carry an explicit selector matched against the count:
//!
//! - an exact set: `{0} There are none`, `{1,2} A couple`
//! - an interval: `[0,1] Few`, `]1,Inf] %count% apples` (square brackets
//!   include the endpoint, reversed brackets exclude it; `-Inf`/`Inf` are
//!   open endpoints)
//!
//! Branches without a selector are positional: a count of one selects the
//! first unmarked branch, anything else the last. Selection is fail-open:
//! if every branch is explicit and none matches, the last branch is used.

use regex::Regex;
use std::sync::OnceLock;

static EXACT_REGEX: OnceLock<Regex> = OnceLock::new();
static INTERVAL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Select the branch of `message` matching `count` and return its body.
///
/// # Example
/// ```
/// use stencil_translate::message::select_branch;
///
/// let message = "{0} No apples|{1} One apple|]1,Inf] %count% apples";
/// assert_eq!(select_branch(message, 0.0), "No apples");
/// assert_eq!(select_branch(message, 1.0), "One apple");
/// assert_eq!(select_branch(message, 7.0), "%count% apples");
/// ```
pub fn select_branch(message: &str, count: f64) -> String {
    let mut unmarked: Vec<&str> = Vec::new();
    let mut last_body = "";

    for branch in message.split('|') {
        if let Some((set, body)) = parse_exact(branch) {
            last_body = body;
            if set.iter().any(|member| *member == count) {
                return body.to_string();
            }
        } else if let Some((interval, body)) = parse_interval(branch) {
            last_body = body;
            if interval.contains(count) {
                return body.to_string();
            }
        } else {
            let body = branch.trim();
            last_body = body;
            unmarked.push(body);
        }
    }

    if unmarked.is_empty() {
        return last_body.to_string();
    }
    let index = if count == 1.0 { 0 } else { unmarked.len() - 1 };
    unmarked[index].to_string()
}

/// An interval selector with independently open or closed endpoints.
struct Interval {
    low: f64,
    low_inclusive: bool,
    high: f64,
    high_inclusive: bool,
}

impl Interval {
    fn contains(&self, count: f64) -> bool {
        let above = if self.low_inclusive {
            count >= self.low
        } else {
            count > self.low
        };
        let below = if self.high_inclusive {
            count <= self.high
        } else {
            count < self.high
        };
        above && below
    }
}

/// Parse an exact-set selector (`{0}`, `{1, 2}`) off the front of a branch.
fn parse_exact(branch: &str) -> Option<(Vec<f64>, &str)> {
    let regex = EXACT_REGEX
        .get_or_init(|| Regex::new(r"^\s*\{([^{}]*)\}\s*(.*)$").unwrap());

    let captures = regex.captures(branch)?;
    let members: Option<Vec<f64>> = captures
        .get(1)
        .map(|list| list.as_str())
        .unwrap_or("")
        .split(',')
        .map(|member| member.trim().parse::<f64>().ok())
        .collect();

    // A malformed set leaves the branch positional.
    let body = captures.get(2).map(|body| body.as_str()).unwrap_or("");
    members.map(|members| (members, body))
}

/// Parse an interval selector (`[0,1]`, `]1,Inf]`) off the front of a branch.
fn parse_interval(branch: &str) -> Option<(Interval, &str)> {
    let regex = INTERVAL_REGEX.get_or_init(|| {
        Regex::new(r"^\s*([\[\]])\s*([^,\[\]]+?)\s*,\s*([^,\[\]]+?)\s*([\[\]])\s*(.*)$").unwrap()
    });

    let captures = regex.captures(branch)?;
    let low = parse_endpoint(captures.get(2)?.as_str())?;
    let high = parse_endpoint(captures.get(3)?.as_str())?;
    let interval = Interval {
        low,
        low_inclusive: captures.get(1)?.as_str() == "[",
        high,
        high_inclusive: captures.get(4)?.as_str() == "]",
    };
    let body = captures.get(5).map(|body| body.as_str()).unwrap_or("");
    Some((interval, body))
}

fn parse_endpoint(endpoint: &str) -> Option<f64> {
    match endpoint.to_ascii_lowercase().as_str() {
        "inf" | "+inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        other => other.parse::<f64>().ok(),
    }
}
