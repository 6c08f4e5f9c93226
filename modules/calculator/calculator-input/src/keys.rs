use calculator_sdk::Operation;
use thiserror::Error;

use crate::action::Digit;

/// A keypad key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(Digit),
    Decimal,
    Operator(Operation),
    Percentage,
    Equals,
    Clear,
    Backspace,
    ToggleSign,
    Sqrt,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown key '{0}'")]
pub struct UnknownKey(pub String);

impl Key {
    fn from_char(c: char) -> Option<Self> {
        if let Ok(digit) = Digit::try_from(c) {
            return Some(Self::Digit(digit));
        }
        let key = match c.to_ascii_lowercase() {
            '.' => Self::Decimal,
            '+' => Self::Operator(Operation::Add),
            '-' => Self::Operator(Operation::Subtract),
            '*' | 'x' => Self::Operator(Operation::Multiply),
            '/' => Self::Operator(Operation::Divide),
            '^' => Self::Operator(Operation::Power),
            '%' => Self::Percentage,
            '=' => Self::Equals,
            'c' => Self::Clear,
            '<' => Self::Backspace,
            'n' => Self::ToggleSign,
            'r' => Self::Sqrt,
            _ => return None,
        };
        Some(key)
    }

    fn from_word(word: &str) -> Option<Self> {
        let key = match word.to_ascii_lowercase().as_str() {
            "enter" => Self::Equals,
            "escape" | "esc" => Self::Clear,
            "bs" | "backspace" => Self::Backspace,
            "neg" => Self::ToggleSign,
            "sqrt" => Self::Sqrt,
            _ => return None,
        };
        Some(key)
    }

    /// Parse one key name or symbol, e.g. `"7"`, `"+"`, `"sqrt"`, `"Enter"`.
    ///
    /// # Errors
    /// `UnknownKey` when `input` names no key.
    pub fn parse(input: &str) -> Result<Self, UnknownKey> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        let single = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        };
        single
            .or_else(|| Self::from_word(trimmed))
            .ok_or_else(|| UnknownKey(trimmed.to_owned()))
    }

    /// Parse a typed line. Whitespace separates tokens; a token that is not a key name is
    /// read one character at a time, so `"12+3="` and `"12 + 3 enter"` are equivalent.
    /// An empty line is a single `Equals`.
    ///
    /// # Errors
    /// `UnknownKey` for the first character that is not a key.
    pub fn parse_line(line: &str) -> Result<Vec<Self>, UnknownKey> {
        let mut keys = Vec::new();
        for token in line.split_whitespace() {
            if let Some(key) = Self::from_word(token) {
                keys.push(key);
                continue;
            }
            for c in token.chars() {
                keys.push(Self::from_char(c).ok_or_else(|| UnknownKey(c.to_string()))?);
            }
        }
        if keys.is_empty() {
            keys.push(Self::Equals);
        }
        Ok(keys)
    }
}
