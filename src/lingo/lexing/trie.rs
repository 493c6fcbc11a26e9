//! Prefix tree over punctuator strings
//!
//! Used by the tokenizer for longest-match scanning of punctuation.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trie {
    children: BTreeMap<char, Trie>,
    terminal: bool,
}

impl Trie {
    /// Build a trie from a flat list of strings, grouping by first character recursively.
    pub fn new<S: AsRef<str>>(words: &[S]) -> Self {
        let mut groups: BTreeMap<char, Vec<&str>> = BTreeMap::new();
        let mut terminal = false;

        for word in words {
            let mut chars = word.as_ref().chars();
            match chars.next() {
                Some(first) => groups.entry(first).or_default().push(chars.as_str()),
                None => terminal = true,
            }
        }

        Trie {
            children: groups
                .into_iter()
                .map(|(first, tails)| (first, Trie::new(tails.as_slice())))
                .collect(),
            terminal,
        }
    }

    /// The subtrie reached by `c`, if any.
    pub fn get(&self, c: char) -> Option<&Trie> {
        self.children.get(&c)
    }

    /// Whether some inserted string ends exactly at this node.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of bytes of `input` consumed by maximal munch from this node.
    ///
    /// Descends while a subtrie exists for the next character and stops at the first
    /// character without one. The consumed text need not end on a terminal node.
    pub fn munch(&self, input: &str) -> usize {
        let mut node = self;
        let mut consumed = 0;
        for c in input.chars() {
            match node.get(c) {
                Some(next) => {
                    node = next;
                    consumed += c.len_utf8();
                }
                None => break,
            }
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_by_first_character() {
        let trie = Trie::new(&["+", "++", "+=", "-"]);
        let plus = trie.get('+').expect("plus subtrie");
        assert!(plus.is_terminal());
        assert!(plus.get('+').is_some());
        assert!(plus.get('=').is_some());
        assert!(trie.get('-').is_some());
        assert!(trie.get('*').is_none());
    }

    #[test]
    fn test_munch_takes_longest_path() {
        let trie = Trie::new(&["=", "==", "==="]);
        assert_eq!(trie.munch("===="), 3);
        assert_eq!(trie.munch("=x"), 1);
        assert_eq!(trie.munch("x"), 0);
    }

    #[test]
    fn test_munch_can_stop_on_non_terminal_prefix() {
        let trie = Trie::new(&["..."]);
        assert_eq!(trie.munch(".. "), 2);
        assert!(!trie.get('.').unwrap().is_terminal());
    }

    #[test]
    fn test_empty_trie() {
        let trie = Trie::new::<&str>(&[]);
        assert!(trie.is_empty());
        assert_eq!(trie.munch("+"), 0);
    }
}
