// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use chrono::Local;
use colored::*;
use kdam::{Bar, tqdm};

/// A timestamped progress bar for tracking sequential batch steps
pub fn progress_bar(n: usize, desc: &str, verbose: bool) -> Bar {
    if !verbose {
        return tqdm!(disable = true);
    }

    tqdm!(
        total = n,
        force_refresh = false,
        desc = stamp(desc),
        bar_format =
            "{desc suffix=' '}[{percentage:.0}%] ({rate:.1}/s, eta: {remaining human=true})"
    )
}

/// Print a timestamped statement to console
pub fn progress_log(desc: &str, verbose: bool) {
    if verbose {
        println!("{}", stamp(desc));
    }
}

fn stamp(desc: &str) -> String {
    let time = Local::now().format("%Y-%m-%d | %H:%M:%S");

    format!(
        "{} {} {} {} {} {}",
        "[".bold(),
        time,
        "|".bold(),
        "sorrel".truecolor(166, 58, 80).bold(),
        "]".bold(),
        desc,
    )
}

/// Format counts into readable thousands format
pub fn thousands_format<T>(number: T) -> String
where
    T: std::fmt::Display,
{
    let digits = number.to_string();

    if digits.len() <= 4 {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_thousands_format() {
        assert_eq!(thousands_format(999), "999");
        assert_eq!(thousands_format(1234), "1234");
        assert_eq!(thousands_format(12345), "12,345");
        assert_eq!(thousands_format(1234567), "1,234,567");
    }
}
