use std::fmt;

/// Words that never start a mention on their own, unless nothing else is left
pub const STOP_WORDS: [&str; 12] = [
    "and", "or", "for", "the", "of", "powder", "syrup", "pinch", "cheese", "ground", "powdered",
    "seeds",
];

/// A contiguous run of words taken from an ingredient name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a>(Vec<&'a str>);

impl Candidate<'_> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn starts_with_stop_word(&self) -> bool {
        self.0
            .first()
            .is_some_and(|word| STOP_WORDS.contains(word))
    }
}

impl fmt::Display for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Build the search candidates for an ingredient name, longest first
///
/// Every contiguous sub-run of the name's words is a candidate. When more than
/// one candidate exists, those starting with a stop word are dropped, so a
/// single-word name like "ground" is still searched for.
pub fn candidates(name: &str) -> Vec<Candidate<'_>> {
    let words: Vec<&str> = name.split_whitespace().collect();

    let mut runs: Vec<Candidate> = (1..=words.len())
        .flat_map(|end| (0..end).map(move |start| (start, end)))
        .map(|(start, end)| Candidate(words[start..end].to_vec()))
        .filter(|candidate| !candidate.is_empty())
        .collect();

    if runs.len() > 1 {
        runs.retain(|candidate| !candidate.starts_with_stop_word());
    }

    // Stable, so equally long runs keep their generation order
    runs.sort_by(|a, b| b.len().cmp(&a.len()));
    runs
}
