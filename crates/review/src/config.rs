//! Review options from environment variables

use std::env;
use std::str::FromStr;

use tracing::warn;

/// How strictly an example's after-move position is checked against its
/// move notation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Consistency {
    /// Replay the mistake on the before-move position at open time; the
    /// example fails unless it lands on the after-move board.
    #[default]
    Strict,
    /// Trust the after-move position; the replay only feeds highlighting.
    Lenient,
}

impl FromStr for Consistency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Consistency::Strict),
            "lenient" => Ok(Consistency::Lenient),
            other => Err(format!("unknown consistency mode '{other}'")),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ReviewOptions {
    pub consistency: Consistency,
}

impl ReviewOptions {
    pub fn from_env() -> Self {
        let consistency = match env::var("REVIEW_CONSISTENCY") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                warn!("{e}, falling back to strict");
                Consistency::Strict
            }),
            Err(_) => Consistency::Strict,
        };
        Self { consistency }
    }

    pub fn lenient() -> Self {
        Self { consistency: Consistency::Lenient }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_consistency() {
        assert_eq!("strict".parse::<Consistency>(), Ok(Consistency::Strict));
        assert_eq!(" Lenient ".parse::<Consistency>(), Ok(Consistency::Lenient));
        assert!("sloppy".parse::<Consistency>().is_err());
        assert_eq!(ReviewOptions::default().consistency, Consistency::Strict);
    }
}
