//! Number words: the fixed English number vocabulary used by the span
//! marker, plus rendering of integers as English words for tooltips.

// ---------------------------------------------------------------------------
// Word → value
// ---------------------------------------------------------------------------

/// Numeric value of a spelled-out number word, including plural scale forms
/// ("dozens"), "half", and "infinity"/"infinite".
pub fn number_word_value(word: &str) -> Option<f64> {
    let value = match word {
        "zero" => 0.0,
        "one" | "ones" => 1.0,
        "two" | "twos" => 2.0,
        "three" | "threes" => 3.0,
        "four" | "fours" => 4.0,
        "five" | "fives" => 5.0,
        "six" | "sixes" => 6.0,
        "seven" | "sevens" => 7.0,
        "eight" | "eights" => 8.0,
        "nine" | "nines" => 9.0,
        "ten" | "tens" => 10.0,
        "eleven" => 11.0,
        "twelve" => 12.0,
        "dozens" => 12.0,
        "thirteen" => 13.0,
        "fourteen" => 14.0,
        "fifteen" => 15.0,
        "sixteen" => 16.0,
        "seventeen" => 17.0,
        "eighteen" => 18.0,
        "nineteen" => 19.0,
        "twenty" => 20.0,
        "thirty" => 30.0,
        "forty" => 40.0,
        "fifty" => 50.0,
        "sixty" => 60.0,
        "seventy" => 70.0,
        "eighty" => 80.0,
        "ninety" => 90.0,
        "hundred" | "hundreds" => 100.0,
        "thousand" | "thousands" => 1_000.0,
        "million" | "millions" => 1_000_000.0,
        "billion" | "billions" => 1_000_000_000.0,
        "trillion" | "trillions" => 1_000_000_000_000.0,
        "half" => 0.5,
        "infinity" | "infinite" => f64::INFINITY,
        _ => return None,
    };
    Some(value)
}

/// Whether `word` (already lowercased) is in the number-word table.
pub fn is_number_word(word: &str) -> bool {
    number_word_value(word).is_some()
}

/// Value string for a hyphenated compound whose two halves are both number
/// words: "twenty-one" → "20-1". Anything else yields `None`.
pub fn hyphenated_number_value(word: &str) -> Option<String> {
    let mut halves = word.split('-');
    let first = halves.next()?;
    let second = halves.next()?;
    if halves.next().is_some() {
        return None;
    }
    let a = number_word_value(first)?;
    let b = number_word_value(second)?;
    Some(format!("{}-{}", format_value(a), format_value(b)))
}

/// Render a table value for display: integers without decimals, "∞" for the
/// infinity entries.
pub fn format_value(value: f64) -> String {
    if value.is_infinite() {
        "∞".to_string()
    } else if value.fract() == 0.0 {
        format!("{}", value as u64)
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// Value → words
// ---------------------------------------------------------------------------

const ONES: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// English words for `n` up to 999,999; larger values fall back to the
/// comma-grouped digit string.
pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }
    if n > 999_999 {
        return group_digits(n);
    }

    let mut result = String::new();
    if n >= 1000 {
        result.push_str(&under_thousand(n / 1000));
        result.push_str(" thousand");
        if n % 1000 != 0 {
            result.push(' ');
            result.push_str(&under_thousand(n % 1000));
        }
    } else {
        result = under_thousand(n);
    }
    result
}

fn under_thousand(n: u64) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    if n < 100 {
        let tens = TENS[(n / 10) as usize];
        return if n % 10 != 0 {
            format!("{}-{}", tens, ONES[(n % 10) as usize])
        } else {
            tens.to_string()
        };
    }
    let mut result = format!("{} hundred", ONES[(n / 100) as usize]);
    if n % 100 != 0 {
        result.push(' ');
        result.push_str(&under_thousand(n % 100));
    }
    result
}

/// Digit string with thousands separators: 1234567 → "1,234,567".
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
