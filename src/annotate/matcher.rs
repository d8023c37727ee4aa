use super::candidates::Candidate;
use log::debug;
use regex::{Regex, RegexBuilder};

/// Marker that opens an ingredient token
pub const TOKEN_MARKER: char = '@';

/// Where a mention was found, as byte offsets into the searched text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mention {
    /// Start of the mentioned name
    pub start: usize,
    /// End of the mentioned name
    pub end: usize,
    /// End of the whole match, guard included
    pub whole_end: usize,
}

impl Mention {
    pub fn as_str<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// A compiled case-insensitive alternation over an ingredient's candidates
#[derive(Debug, Clone)]
pub struct MentionPattern {
    regex: Regex,
}

/// Build the pattern source for a set of candidates
///
/// Candidates keep their order in the alternation so the longest one wins
/// wherever several could match at the same place. The guard group consumes
/// the character before the name, which must not be the token marker.
pub fn pattern_source(candidates: &[Candidate]) -> String {
    let alternation = candidates
        .iter()
        .map(|candidate| format!(r"\b{}\b", regex::escape(&candidate.to_string())))
        .collect::<Vec<String>>()
        .join("|");
    format!(
        "(?:^|[^{}])({})",
        regex::escape(&TOKEN_MARKER.to_string()),
        alternation
    )
}

impl MentionPattern {
    /// Compile the candidates; `None` when there is nothing to search for
    pub fn compile(candidates: &[Candidate]) -> Result<Option<Self>, regex::Error> {
        if candidates.is_empty() {
            return Ok(None);
        }
        let source = pattern_source(candidates);
        debug!("Mention pattern: {}", source);
        let regex = RegexBuilder::new(&source).case_insensitive(true).build()?;
        Ok(Some(MentionPattern { regex }))
    }

    /// Find the first mention in the text
    pub fn find(&self, text: &str) -> Option<Mention> {
        let caps = self.regex.captures(text)?;
        let whole = caps.get(0)?;
        let name = caps.get(1)?;
        Some(Mention {
            start: name.start(),
            end: name.end(),
            whole_end: whole.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::candidates::candidates;

    fn pattern(name: &str) -> MentionPattern {
        MentionPattern::compile(&candidates(name)).unwrap().unwrap()
    }

    #[test]
    fn test_pattern_source() {
        let source = pattern_source(&candidates("brown sugar"));
        assert_eq!(source, r"(?:^|[^@])(\bbrown sugar\b|\bbrown\b|\bsugar\b)");
    }

    #[test]
    fn test_candidates_are_escaped() {
        let source = pattern_source(&candidates("c++"));
        assert!(source.contains(r"\bc\+\+\b"));
    }

    #[test]
    fn test_empty_candidates_compile_to_nothing() {
        assert!(MentionPattern::compile(&[]).unwrap().is_none());
    }

    #[test]
    fn test_finds_name_inside_sentence() {
        let text = "Add the flour and mix.";
        let mention = pattern("flour").find(text).unwrap();
        assert_eq!(mention.as_str(text), "flour");
        assert_eq!(mention.start, 8);
        assert_eq!(mention.whole_end, 13);
    }

    #[test]
    fn test_match_at_start_of_text() {
        let text = "Flour goes in first.";
        let mention = pattern("flour").find(text).unwrap();
        assert_eq!(mention.start, 0);
        assert_eq!(mention.as_str(text), "Flour");
    }

    #[test]
    fn test_case_insensitive() {
        let text = "Whisk the EGGS.";
        assert_eq!(pattern("eggs").find(text).unwrap().as_str(text), "EGGS");
    }

    #[test]
    fn test_word_boundaries() {
        assert!(pattern("oil").find("Boil the water.").is_none());
    }

    #[test]
    fn test_longest_candidate_wins_at_same_place() {
        let text = "Stir in the brown sugar.";
        assert_eq!(pattern("brown sugar").find(text).unwrap().as_str(text), "brown sugar");
    }

    #[test]
    fn test_partial_mention() {
        let text = "Fry the onion until soft.";
        assert_eq!(pattern("diced onion").find(text).unwrap().as_str(text), "onion");
    }

    #[test]
    fn test_guard_skips_existing_token() {
        let text = "Add @flour{2%cup} then more flour.";
        let mention = pattern("flour").find(text).unwrap();
        assert_eq!(mention.start, 28);
    }

    #[test]
    fn test_no_match() {
        assert!(pattern("turmeric").find("Add the flour and mix.").is_none());
    }
}
