use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\+\*\-/()\[\]\{\}\s]").expect("invalid regex"));
static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__+").expect("invalid regex"));
static FIRST_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("invalid regex"));
static ALL_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("invalid regex"));
static METRIC_REPLACEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^a-zA-Z0-9_.]+)|(^[^a-zA-Z]+)").expect("invalid regex"));
static DOT_UNDERSCORE_CLEANUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_*\._*").expect("invalid regex"));

pub fn normalize_name(raw: &str, prefix: Option<&str>, fix_case: bool) -> String {
    let ascii = to_ascii(raw);

    let (name, prefix) = if fix_case {
        (camel_to_snake(&ascii), prefix.map(camel_to_snake))
    } else {
        (
            ILLEGAL_CHARS.replace_all(&ascii, "_").into_owned(),
            prefix.map(str::to_string),
        )
    };

    let name = UNDERSCORE_RUNS.replace_all(&name, "_");
    let name = name.strip_prefix('_').unwrap_or(&name);
    let name = name.strip_suffix('_').unwrap_or(name);
    let name = name.replace("._", ".").replace("_.", ".");

    match prefix {
        Some(p) => format!("{p}.{name}"),
        None => name,
    }
}

pub fn camel_to_snake(name: &str) -> String {
    let split = FIRST_CAP.replace_all(name, "${1}_${2}");
    let split = ALL_CAP.replace_all(&split, "${1}_${2}").to_lowercase();
    let cleaned = METRIC_REPLACEMENT.replace_all(&split, "_");
    DOT_UNDERSCORE_CLEANUP
        .replace_all(&cleaned, ".")
        .trim_matches('_')
        .to_string()
}

fn to_ascii(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.nfkd().filter(|c| c.is_ascii()).collect())
    }
}
