/// Longest interval text accepted, enough for several days of seconds.
const MAX_LEN: usize = 6;

/// Text buffer behind the interval field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalInput {
    text: String,
}

impl IntervalInput {
    pub fn new(interval_secs: u32) -> Self {
        Self {
            text: interval_secs.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed value, `None` when the field is empty or not a number.
    pub fn value(&self) -> Option<i64> {
        self.text.parse().ok()
    }

    /// Handle a key name from a key-down event. Returns true if the buffer
    /// changed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match key {
            "backspace" => self.text.pop().is_some(),
            _ if key.len() == 1 && key.chars().all(|c| c.is_ascii_digit()) => {
                if self.text.len() >= MAX_LEN {
                    return false;
                }
                if self.text == "0" {
                    self.text.clear();
                }
                self.text.push_str(key);
                true
            }
            _ => false,
        }
    }

    pub fn increment(&mut self) {
        let next = self.value().unwrap_or(0).saturating_add(1);
        if next.to_string().len() <= MAX_LEN {
            self.text = next.to_string();
        }
    }

    pub fn decrement(&mut self) {
        let next = self.value().unwrap_or(0).saturating_sub(1).max(0);
        self.text = next.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_configured_interval() {
        let input = IntervalInput::new(55);
        assert_eq!(input.text(), "55");
        assert_eq!(input.value(), Some(55));
    }

    #[test]
    fn typing_digits_appends() {
        let mut input = IntervalInput::new(5);
        assert!(input.handle_key("0"));
        assert_eq!(input.value(), Some(50));
    }

    #[test]
    fn non_digit_keys_are_ignored() {
        let mut input = IntervalInput::new(5);
        assert!(!input.handle_key("a"));
        assert!(!input.handle_key("-"));
        assert!(!input.handle_key("space"));
        assert_eq!(input.text(), "5");
    }

    #[test]
    fn clearing_the_field_yields_no_value() {
        let mut input = IntervalInput::new(12);
        assert!(input.handle_key("backspace"));
        assert!(input.handle_key("backspace"));
        assert!(!input.handle_key("backspace"));
        assert_eq!(input.value(), None);
    }

    #[test]
    fn leading_zero_is_replaced() {
        let mut input = IntervalInput::new(0);
        input.handle_key("7");
        assert_eq!(input.text(), "7");
    }

    #[test]
    fn length_is_capped() {
        let mut input = IntervalInput::new(999_999);
        assert!(!input.handle_key("1"));
        input.increment();
        assert_eq!(input.value(), Some(999_999));
    }

    #[test]
    fn decrement_stops_at_zero() {
        let mut input = IntervalInput::new(1);
        input.decrement();
        input.decrement();
        assert_eq!(input.value(), Some(0));
    }

    #[test]
    fn increment_on_empty_field_starts_at_one() {
        let mut input = IntervalInput::new(1);
        input.handle_key("backspace");
        input.increment();
        assert_eq!(input.value(), Some(1));
    }
}
