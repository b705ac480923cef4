// Short descriptions for compact displays such as genome browsers

use super::{Result, Sequence};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;

/// Remove the leading species and `(common name)` from a description.
///
/// Matching is case-insensitive. An empty `()` left behind by a missing
/// common name is dropped, and a remainder that is entirely wrapped in one
/// pair of parentheses is unwrapped.
pub fn short_description(description: &str, sequence: &Sequence) -> Result<String> {
    let species: BTreeSet<String> = sequence
        .accessions
        .iter()
        .filter_map(|a| a.species.as_deref())
        .filter(|s| !s.is_empty())
        .map(regex::escape)
        .collect();
    let common_names: BTreeSet<String> = sequence
        .accessions
        .iter()
        .filter_map(|a| a.common_name.as_deref())
        .filter(|c| !c.is_empty())
        .map(|c| regex::escape(&format!("({})", c)))
        .collect();

    let mut description = description.to_string();
    for pattern in species.iter().chain(common_names.iter()) {
        let re = RegexBuilder::new(&format!("^{}", pattern))
            .case_insensitive(true)
            .build()?;
        description = re.replace(&description, "").trim().to_string();
    }

    let empty_marker = Regex::new(r"^\s*(\(\))?\s*")?;
    let description = empty_marker.replace(&description, "").into_owned();

    if let Some(inner) = description
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        if !inner.contains(')') {
            return Ok(inner.to_string());
        }
    }

    Ok(description)
}
