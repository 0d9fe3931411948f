use crate::Error;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    // ${VAR:-default} or ${VAR-default}
    static ref WITH_DEFAULT: Regex =
        Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*):?-(.*?)\}").expect("valid regex");
    // ${VAR}
    static ref PLAIN: Regex = Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("valid regex");
}

/// substitutes `${VAR}` and `${VAR:-default}` occurrences in `data` using `vars`.
/// Unset or empty variables fall back to the default, or to an empty string when none is given.
pub fn substitute(data: &str, vars: &HashMap<String, String>) -> crate::Result<String> {
    if data.contains("${}") {
        return Err(Error::Custom(format!("empty variable reference in {}", data)));
    }

    let with_defaults = WITH_DEFAULT.replace_all(data, |cap: &regex::Captures| {
        match vars.get(&cap[1]) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => cap[2].to_string(),
        }
    });

    let plain = PLAIN.replace_all(&with_defaults, |cap: &regex::Captures| {
        vars.get(&cap[1]).cloned().unwrap_or_default()
    });

    Ok(plain.into_owned())
}
