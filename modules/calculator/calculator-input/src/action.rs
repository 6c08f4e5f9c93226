use calculator_sdk::Operation;
use thiserror::Error;

/// A single decimal digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit(u8);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a decimal digit")]
pub struct NotADigit(pub char);

impl Digit {
    #[must_use]
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<char> for Digit {
    type Error = NotADigit;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .map(Self)
            .ok_or(NotADigit(c))
    }
}

/// One discrete user or network event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    InputDigit(Digit),
    InputDecimal,
    SetOperation(Operation),
    Percentage,
    ToggleSign,
    Backspace,
    Clear,
    ClearError,
    SetLoading(bool),
    SetResult(f64),
    SetError(String),
}
