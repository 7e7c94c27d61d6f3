//! Confidence levels attached to every normalization outcome

use serde::{Deserialize, Serialize};

use super::ordered::OrderedMap;

/// How sure a normalizer is about its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Parsed or matched unambiguously
    High,
    /// Ambiguous match, or value passed through unchanged
    Medium,
    /// Nothing could be parsed or matched
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Confidence::High),
            "medium" => Ok(Confidence::Medium),
            "low" => Ok(Confidence::Low),
            _ => Err(format!("Unknown confidence level: {}", s)),
        }
    }
}

/// A normalized value paired with its confidence
///
/// An empty value (empty string, or `None` for numbers) is the "could not
/// normalize" sentinel and always comes with [`Confidence::Low`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    pub confidence: Confidence,
}

impl<T> Normalized<T> {
    pub fn new(value: T, confidence: Confidence) -> Self {
        Self { value, confidence }
    }

    pub fn high(value: T) -> Self {
        Self::new(value, Confidence::High)
    }

    pub fn medium(value: T) -> Self {
        Self::new(value, Confidence::Medium)
    }

    /// Split into a `(value, confidence)` pair
    pub fn into_parts(self) -> (T, Confidence) {
        (self.value, self.confidence)
    }
}

impl Normalized<String> {
    /// The `("", low)` sentinel
    pub fn empty() -> Self {
        Self::new(String::new(), Confidence::Low)
    }
}

impl<T> Normalized<Option<T>> {
    /// The `(none, low)` sentinel
    pub fn none() -> Self {
        Self::new(None, Confidence::Low)
    }
}

/// `"{field}_confidence"` to confidence, in the order fields were normalized
pub type ConfidenceMap = OrderedMap<Confidence>;

/// Key under which a field's confidence is recorded
pub fn confidence_key(field: &str) -> String {
    format!("{}_confidence", field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Confidence::Medium).unwrap(), "\"medium\"");
        let c: Confidence = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(c, Confidence::Low);
    }

    #[test]
    fn test_parse() {
        assert_eq!("HIGH".parse::<Confidence>().unwrap(), Confidence::High);
        assert!("maybe".parse::<Confidence>().is_err());
    }

    #[test]
    fn test_confidence_key() {
        assert_eq!(confidence_key("Date received"), "Date received_confidence");
    }
}
