//! Digit masks for formatted inputs (phone, CPF, CEP).
//!
//! A pattern uses `9` for a digit slot; every other character is a literal.
//! Literals are emitted only once a digit follows them, so a partially typed
//! value never ends with a dangling separator.

/// A fixed-width digit mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mask {
    pattern: &'static str,
}

impl Mask {
    pub const PHONE: Mask = Mask::new("(99) 99999-9999");
    pub const CPF: Mask = Mask::new("999.999.999-99");
    pub const ZIPCODE: Mask = Mask::new("99999-999");

    pub const fn new(pattern: &'static str) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Number of digit slots in the pattern.
    pub fn slots(&self) -> usize {
        self.pattern.chars().filter(|c| *c == '9').count()
    }

    /// Format `raw` against the mask. Non-digits are ignored, excess digits dropped.
    pub fn apply(&self, raw: &str) -> String {
        let mut digits = raw.chars().filter(char::is_ascii_digit).peekable();
        let mut out = String::with_capacity(self.pattern.len());
        let mut pending = String::new();

        for slot in self.pattern.chars() {
            if digits.peek().is_none() {
                break;
            }
            if slot == '9' {
                out.push_str(&pending);
                pending.clear();
                if let Some(d) = digits.next() {
                    out.push(d);
                }
            } else {
                pending.push(slot);
            }
        }
        out
    }

    /// Whether `value` fills every slot of the mask.
    pub fn is_complete(&self, value: &str) -> bool {
        self.apply(value) == value && digits(value).len() == self.slots()
    }
}

/// Strip everything but ASCII digits.
pub fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
