use std::str::FromStr;
use std::time::Duration;

/// Request timeouts such as `30s`, `2m` or `1m30s`. A bare number means
/// seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3600),
        _ => None,
    }
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let input: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if input.is_empty() {
            return Err("Duration must include a number".to_string());
        }

        let mut total: u64 = 0;
        let mut rest = input.as_str();
        while !rest.is_empty() {
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if digits == 0 {
                return Err(format!("Expected a number before '{}'", rest));
            }
            let amount: u64 = rest[..digits]
                .parse()
                .map_err(|_| "Duration is too large".to_string())?;
            rest = &rest[digits..];

            let multiplier = match rest.chars().next() {
                None => 1,
                Some(unit) => {
                    rest = &rest[unit.len_utf8()..];
                    unit_seconds(unit).ok_or_else(|| format!("Invalid duration unit: {}", unit))?
                }
            };

            total = amount
                .checked_mul(multiplier)
                .and_then(|secs| total.checked_add(secs))
                .ok_or_else(|| "Duration is too large".to_string())?;
        }

        Ok(HumanDuration(Duration::from_secs(total)))
    }
}
