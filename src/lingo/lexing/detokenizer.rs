//! Detokenizer
//!
//! Converts a token list back into source text. Since soft tokens keep the ether verbatim,
//! detokenizing the output of [tokenize](super::tokenize) reproduces the source exactly.

use super::tokens::Token;

/// Trait for converting a token to its source representation
pub trait ToSourceString {
    fn to_source_string(&self) -> &str;
}

impl ToSourceString for Token {
    fn to_source_string(&self) -> &str {
        self.text()
    }
}

/// Detokenize a stream of tokens into a string
pub fn detokenize(tokens: &[Token]) -> String {
    let mut result = String::with_capacity(tokens.iter().map(|t| t.text().len()).sum());
    for token in tokens {
        result.push_str(token.to_source_string());
    }
    result
}
