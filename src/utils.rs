// src/utils.rs

//! Small helpers shared by the storefront modules.

mod time;

pub use time::Time;

/// String utilities
pub mod strings {
    /// Trim surrounding whitespace and keep at most `max_chars` characters.
    ///
    /// Counts Unicode scalar values, so multi-byte names are never split
    /// mid-character.
    pub fn trim_to(s: &str, max_chars: usize) -> String {
        s.trim().chars().take(max_chars).collect()
    }

    /// Lower-cased copy used for case-insensitive matching
    pub fn fold(s: &str) -> String {
        s.to_lowercase()
    }
}

/// Currency formatting
pub mod currency {
    /// Symbol for currency codes the storefront knows about
    pub fn symbol(code: &str) -> Option<&'static str> {
        match code {
            "INR" => Some("₹"),
            "USD" => Some("$"),
            "EUR" => Some("€"),
            _ => None,
        }
    }

    /// Render a whole-unit amount using Indian digit grouping, e.g. `₹1,59,900.00`.
    pub fn format_inr(amount: u64) -> String {
        format!("₹{}.00", group_indian(amount))
    }

    /// Render an amount for `code`; unknown codes fall back to `CODE 1,234.00`.
    pub fn format(amount: u64, code: &str) -> String {
        match (code, symbol(code)) {
            ("INR", _) => format_inr(amount),
            (_, Some(symbol)) => format!("{}{}.00", symbol, group_thousands(amount)),
            (_, None) => format!("{} {}.00", code, group_thousands(amount)),
        }
    }

    /// Last three digits, then groups of two
    fn group_indian(amount: u64) -> String {
        let digits = amount.to_string();
        if digits.len() <= 3 {
            return digits;
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();

        format!("{},{}", groups.join(","), tail)
    }

    fn group_thousands(amount: u64) -> String {
        let digits = amount.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}
