//! Command argument tokenizer.
//!
//! Words are split on whitespace. A word starting with `-` (and longer than
//! one character) is a flag and can appear anywhere. The remainder keeps the
//! original text, line breaks included, minus flag words.

#[derive(Debug, Clone)]
struct Token {
    start: usize,
    end: usize,
    flag: bool,
}

#[derive(Debug, Clone)]
pub struct Arguments {
    input: String,
    tokens: Vec<Token>,
    cursor: usize,
    consumed_flags: Vec<bool>,
}

impl Arguments {
    pub fn new(input: impl Into<String>) -> Self {
        let input = input.into();
        let mut tokens = Vec::new();
        let mut start = None;

        for (index, ch) in input.char_indices() {
            match (ch.is_whitespace(), start) {
                (true, Some(s)) => {
                    tokens.push(Self::token(&input, s, index));
                    start = None;
                }
                (false, None) => start = Some(index),
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push(Self::token(&input, s, input.len()));
        }

        let consumed_flags = vec![false; tokens.len()];
        Self {
            input,
            tokens,
            cursor: 0,
            consumed_flags,
        }
    }

    fn token(input: &str, start: usize, end: usize) -> Token {
        let word = &input[start..end];
        Token {
            start,
            end,
            flag: word.len() > 1 && word.starts_with('-'),
        }
    }

    fn word(&self, token: &Token) -> &str {
        &self.input[token.start..token.end]
    }

    fn next_word_index(&self) -> Option<usize> {
        (self.cursor..self.tokens.len()).find(|&i| !self.tokens[i].flag)
    }

    pub fn has_next(&self) -> bool {
        self.next_word_index().is_some()
    }

    pub fn peek(&self) -> Option<&str> {
        self.next_word_index().map(|i| self.word(&self.tokens[i]))
    }

    pub fn pop(&mut self) -> Option<String> {
        let index = self.next_word_index()?;
        self.cursor = index + 1;
        Some(self.word(&self.tokens[index]).to_string())
    }

    /// Pops the next word when it equals one of `words`, ignoring case.
    pub fn match_word(&mut self, words: &[&str]) -> bool {
        let matched = self
            .peek()
            .is_some_and(|w| words.iter().any(|candidate| w.eq_ignore_ascii_case(candidate)));
        if matched {
            self.pop();
        }
        matched
    }

    /// How many positional words are left.
    pub fn remaining_words(&self) -> usize {
        (self.cursor..self.tokens.len())
            .filter(|&i| !self.tokens[i].flag)
            .count()
    }

    /// Consumes the first unconsumed flag named like one of `names`.
    pub fn match_flag(&mut self, names: &[&str]) -> bool {
        let found = (0..self.tokens.len()).find(|&i| {
            let token = &self.tokens[i];
            token.flag
                && !self.consumed_flags[i]
                && names
                    .iter()
                    .any(|name| self.word(token)[1..].eq_ignore_ascii_case(name))
        });
        match found {
            Some(index) => {
                self.consumed_flags[index] = true;
                true
            }
            None => false,
        }
    }

    /// Everything after the cursor with flag words cut out, trimmed.
    pub fn remainder_or_none(&mut self) -> Option<String> {
        let first = self.next_word_index()?;
        let start = self.tokens[first].start;

        let mut text = String::new();
        let mut position = start;
        for token in self.tokens[first..].iter().filter(|t| t.flag) {
            text.push_str(&self.input[position..token.start]);
            position = token.end;
        }
        text.push_str(&self.input[position..]);
        self.cursor = self.tokens.len();

        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_skips_flags() {
        let mut args = Arguments::new("-raw group  abcde");
        assert_eq!(args.pop().as_deref(), Some("group"));
        assert_eq!(args.peek(), Some("abcde"));
        assert!(args.match_flag(&["r", "raw"]));
        assert!(!args.match_flag(&["raw"]));
    }

    #[test]
    fn test_remainder_keeps_line_breaks_and_drops_flags() {
        let mut args = Arguments::new("description Hello\nworld -raw");
        assert!(args.match_word(&["description"]));
        assert_eq!(args.remainder_or_none().as_deref(), Some("Hello\nworld"));
        assert!(!args.has_next());
        assert!(args.remainder_or_none().is_none());
    }

    #[test]
    fn test_only_flags_left_means_no_next() {
        let mut args = Arguments::new("description -clear");
        args.pop();
        assert!(!args.has_next());
        assert!(args.remainder_or_none().is_none());
        assert!(args.match_flag(&["c", "clear"]));
    }

    #[test]
    fn test_match_word_is_case_insensitive() {
        let mut args = Arguments::new("GROUP new Alters");
        assert!(args.match_word(&["g", "group"]));
        assert!(!args.match_word(&["list"]));
        assert!(args.match_word(&["new"]));
        assert_eq!(args.remaining_words(), 1);
    }

    #[test]
    fn test_lone_dash_is_a_word() {
        let mut args = Arguments::new("a - b");
        assert_eq!(args.remainder_or_none().as_deref(), Some("a - b"));
    }
}
