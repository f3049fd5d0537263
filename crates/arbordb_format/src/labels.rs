//! Spelled-out cardinal labels for node keys.
//!
//! English uses the short scale without "and" ("one hundred one").
//! Spanish uses standard orthography and the long scale: thousands fold
//! into the `mil` group ("mil millones" rather than a separate scale
//! word), and a trailing "uno" apocopates to "un" before `mil` and the
//! scale words ("veintiún mil", "un millón").
//!
//! Both spellers are total over `i64`; negative keys take a "minus" /
//! "menos" prefix and `i64::MIN` is handled through the unsigned
//! magnitude.

use crate::locale::Locale;
use arbordb_store::NodeKey;

const EN_SMALL: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const EN_TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const EN_SCALES: [&str; 7] = [
    "", "thousand", "million", "billion", "trillion", "quadrillion", "quintillion",
];

const ES_SMALL: [&str; 30] = [
    "cero",
    "uno",
    "dos",
    "tres",
    "cuatro",
    "cinco",
    "seis",
    "siete",
    "ocho",
    "nueve",
    "diez",
    "once",
    "doce",
    "trece",
    "catorce",
    "quince",
    "dieciséis",
    "diecisiete",
    "dieciocho",
    "diecinueve",
    "veinte",
    "veintiuno",
    "veintidós",
    "veintitrés",
    "veinticuatro",
    "veinticinco",
    "veintiséis",
    "veintisiete",
    "veintiocho",
    "veintinueve",
];

const ES_TENS: [&str; 10] = [
    "", "", "", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta", "noventa",
];

const ES_HUNDREDS: [&str; 10] = [
    "",
    "ciento",
    "doscientos",
    "trescientos",
    "cuatrocientos",
    "quinientos",
    "seiscientos",
    "setecientos",
    "ochocientos",
    "novecientos",
];

// Long scale: each step is a factor of one million.
const ES_SCALES: [(&str, &str); 3] = [
    ("millón", "millones"),
    ("billón", "billones"),
    ("trillón", "trillones"),
];

/// Renders a node key as a spelled-out cardinal in the given locale.
///
/// ```rust
/// use arbordb_format::{render_label, Locale};
/// use arbordb_store::NodeKey;
///
/// assert_eq!(render_label(NodeKey::new(365), Locale::En), "three hundred sixty-five");
/// assert_eq!(render_label(NodeKey::new(21_000), Locale::Es), "veintiún mil");
/// assert_eq!(render_label(NodeKey::new(-7), Locale::En), "minus seven");
/// ```
#[must_use]
pub fn render_label(key: NodeKey, locale: Locale) -> String {
    let value = key.as_i64();
    let magnitude = value.unsigned_abs();
    let spelled = match locale {
        Locale::En => english(magnitude),
        Locale::Es => spanish(magnitude),
    };
    if value < 0 {
        let prefix = match locale {
            Locale::En => "minus",
            Locale::Es => "menos",
        };
        format!("{prefix} {spelled}")
    } else {
        spelled
    }
}

fn english(value: u64) -> String {
    if value == 0 {
        return EN_SMALL[0].to_string();
    }

    let mut groups: Vec<(u64, usize)> = Vec::new();
    let mut rest = value;
    let mut scale = 0;
    while rest > 0 {
        groups.push((rest % 1000, scale));
        rest /= 1000;
        scale += 1;
    }

    let mut words: Vec<String> = Vec::new();
    for &(group, scale) in groups.iter().rev() {
        if group == 0 {
            continue;
        }
        words.push(en_hundreds(group));
        if scale > 0 {
            words.push(EN_SCALES[scale].to_string());
        }
    }
    words.join(" ")
}

fn en_hundreds(n: u64) -> String {
    let mut parts: Vec<String> = Vec::new();
    let hundreds = (n / 100) as usize;
    let rem = n % 100;

    if hundreds > 0 {
        parts.push(format!("{} hundred", EN_SMALL[hundreds]));
    }
    match rem {
        0 => {}
        1..=19 => parts.push(EN_SMALL[rem as usize].to_string()),
        _ => {
            let tens = EN_TENS[(rem / 10) as usize];
            let unit = (rem % 10) as usize;
            if unit == 0 {
                parts.push(tens.to_string());
            } else {
                parts.push(format!("{}-{}", tens, EN_SMALL[unit]));
            }
        }
    }
    parts.join(" ")
}

fn spanish(value: u64) -> String {
    if value == 0 {
        return ES_SMALL[0].to_string();
    }

    let mut groups: Vec<(u64, usize)> = Vec::new();
    let mut rest = value;
    let mut scale = 0;
    while rest > 0 {
        groups.push((rest % 1_000_000, scale));
        rest /= 1_000_000;
        scale += 1;
    }

    let mut words: Vec<String> = Vec::new();
    for &(group, scale) in groups.iter().rev() {
        if group == 0 {
            continue;
        }
        if scale == 0 {
            words.push(es_miles(group));
        } else {
            let (singular, plural) = ES_SCALES[scale - 1];
            if group == 1 {
                words.push(format!("un {singular}"));
            } else {
                words.push(format!("{} {}", apocopate(&es_miles(group)), plural));
            }
        }
    }
    words.join(" ")
}

/// Spells 1..=999_999, folding thousands into the `mil` group.
fn es_miles(n: u64) -> String {
    let thousands = n / 1000;
    let rem = n % 1000;

    let mut parts: Vec<String> = Vec::new();
    match thousands {
        0 => {}
        1 => parts.push("mil".to_string()),
        t => parts.push(format!("{} mil", apocopate(&es_hundreds(t)))),
    }
    if rem > 0 {
        parts.push(es_hundreds(rem));
    }
    parts.join(" ")
}

/// Spells 1..=999.
fn es_hundreds(n: u64) -> String {
    if n == 100 {
        return "cien".to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let hundreds = (n / 100) as usize;
    let rem = n % 100;

    if hundreds > 0 {
        parts.push(ES_HUNDREDS[hundreds].to_string());
    }
    match rem {
        0 => {}
        1..=29 => parts.push(ES_SMALL[rem as usize].to_string()),
        _ => {
            let tens = ES_TENS[(rem / 10) as usize];
            let unit = rem % 10;
            if unit == 0 {
                parts.push(tens.to_string());
            } else {
                parts.push(format!("{} y {}", tens, ES_SMALL[unit as usize]));
            }
        }
    }
    parts.join(" ")
}

/// "uno" loses its final vowel before `mil` and the scale words.
fn apocopate(spelled: &str) -> String {
    if let Some(stem) = spelled.strip_suffix("veintiuno") {
        format!("{stem}veintiún")
    } else if let Some(stem) = spelled.strip_suffix("uno") {
        format!("{stem}un")
    } else {
        spelled.to_string()
    }
}
