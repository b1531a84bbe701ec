const UNITS: [&str; 10] = [
    "", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf",
];

const TEENS: [&str; 10] = [
    "dix", "onze", "douze", "treize", "quatorze", "quinze", "seize", "dix-sept", "dix-huit",
    "dix-neuf",
];

const TENS: [&str; 10] = [
    "",
    "dix",
    "vingt",
    "trente",
    "quarante",
    "cinquante",
    "soixante",
    "soixante-dix",
    "quatre-vingt",
    "quatre-vingt-dix",
];

/// Spells a non-negative integer in French, lowercase.
///
/// Magnitudes are consumed from millions down to units. "mille" never takes
/// "un" nor a plural, "million" takes both, and "cent" is pluralized only
/// when nothing follows it ("deux cents", "deux cent un").
///
/// Scales above the millions are not named: 10^9 comes out as
/// "mille millions". Callers that print amounts cap the input below that.
pub fn number_to_french_words(n: u64) -> String {
    if n == 0 {
        return "zéro".to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let mut rest = n;

    let millions = rest / 1_000_000;
    if millions > 0 {
        parts.push(if millions == 1 {
            "un million".to_string()
        } else {
            format!("{} millions", number_to_french_words(millions))
        });
        rest %= 1_000_000;
    }

    let thousands = rest / 1_000;
    if thousands > 0 {
        parts.push(if thousands == 1 {
            "mille".to_string()
        } else {
            format!("{} mille", number_to_french_words(thousands))
        });
        rest %= 1_000;
    }

    let hundreds = (rest / 100) as usize;
    if hundreds > 0 {
        rest %= 100;
        parts.push(match hundreds {
            1 => "cent".to_string(),
            h if rest == 0 => format!("{} cents", UNITS[h]),
            h => format!("{} cent", UNITS[h]),
        });
    }

    if rest > 0 {
        parts.push(below_hundred(rest as usize));
    }

    parts.join(" ")
}

fn below_hundred(n: usize) -> String {
    match n {
        0..=9 => UNITS[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        _ => {
            let ten = n / 10;
            let unit = n % 10;
            // 70-79 and 90-99 count on from soixante / quatre-vingt through the teens.
            let (base, tail) = match ten {
                7 | 9 => (TENS[ten - 1], TEENS[unit]),
                _ if unit == 0 => return TENS[ten].to_string(),
                _ => (TENS[ten], UNITS[unit]),
            };
            let connector = if unit == 1 && ten < 8 { " et " } else { "-" };
            format!("{base}{connector}{tail}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(cases: &[(u64, &str)]) {
        for (n, expected) in cases {
            assert_eq!(number_to_french_words(*n), *expected, "n = {n}");
        }
    }

    #[test]
    fn zero_and_units() {
        check(&[(0, "zéro"), (1, "un"), (5, "cinq"), (9, "neuf")]);
    }

    #[test]
    fn teens() {
        check(&[(10, "dix"), (11, "onze"), (16, "seize"), (17, "dix-sept"), (19, "dix-neuf")]);
    }

    #[test]
    fn tens_use_et_for_one_below_seventy() {
        check(&[
            (20, "vingt"),
            (21, "vingt et un"),
            (22, "vingt-deux"),
            (31, "trente et un"),
            (45, "quarante-cinq"),
            (51, "cinquante et un"),
            (61, "soixante et un"),
            (69, "soixante-neuf"),
        ]);
    }

    #[test]
    fn seventies_and_nineties_count_through_the_teens() {
        check(&[
            (70, "soixante-dix"),
            (71, "soixante et onze"),
            (72, "soixante-douze"),
            (77, "soixante-dix-sept"),
            (79, "soixante-dix-neuf"),
            (80, "quatre-vingt"),
            (81, "quatre-vingt-un"),
            (88, "quatre-vingt-huit"),
            (90, "quatre-vingt-dix"),
            (91, "quatre-vingt-onze"),
            (96, "quatre-vingt-seize"),
            (99, "quatre-vingt-dix-neuf"),
        ]);
    }

    #[test]
    fn hundreds_pluralize_only_when_round() {
        check(&[
            (100, "cent"),
            (101, "cent un"),
            (200, "deux cents"),
            (201, "deux cent un"),
            (371, "trois cent soixante et onze"),
            (900, "neuf cents"),
            (999, "neuf cent quatre-vingt-dix-neuf"),
        ]);
    }

    #[test]
    fn thousands_drop_un_and_never_pluralize() {
        check(&[
            (1_000, "mille"),
            (1_001, "mille un"),
            (2_000, "deux mille"),
            (3_500, "trois mille cinq cents"),
            (21_000, "vingt et un mille"),
            (100_000, "cent mille"),
            (999_999, "neuf cent quatre-vingt-dix-neuf mille neuf cent quatre-vingt-dix-neuf"),
        ]);
    }

    #[test]
    fn millions_keep_un_and_pluralize() {
        check(&[
            (1_000_000, "un million"),
            (1_000_001, "un million un"),
            (1_001_000, "un million mille"),
            (2_000_000, "deux millions"),
            (2_500_300, "deux millions cinq cents mille trois cents"),
            (999_999_999, "neuf cent quatre-vingt-dix-neuf millions neuf cent quatre-vingt-dix-neuf mille neuf cent quatre-vingt-dix-neuf"),
        ]);
    }

    #[test]
    fn round_hundreds_keep_plural_before_mille() {
        // "deux cents mille" rather than the dictionary "deux cent mille".
        check(&[(200_000, "deux cents mille")]);
    }

    #[test]
    fn no_padding_whitespace() {
        for n in [1_000u64, 1_000_000, 1_001_000, 2_000_100, 100] {
            let words = number_to_french_words(n);
            assert_eq!(words.trim(), words);
            assert!(!words.contains("  "), "double space in {words:?}");
        }
    }
}
