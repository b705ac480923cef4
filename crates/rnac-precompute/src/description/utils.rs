// Helpers shared by the description rules

use super::{Accession, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Shannon entropy (base 2) of the character distribution of `text`.
pub fn entropy(text: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in text.chars() {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let value: f64 = counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();

    // -0.0 for single character strings
    value.abs()
}

/// Entropy rounded to three decimals, as an integer number of thousandths.
fn rounded_entropy(text: &str) -> i64 {
    (entropy(text) * 1000.0).round() as i64
}

/// Ranking of two descriptions: higher rounded entropy first, then the
/// string that is lower character by character.
pub fn description_order(a: &str, b: &str) -> Ordering {
    rounded_entropy(a).cmp(&rounded_entropy(b)).then_with(|| {
        let left = a.chars().map(|c| -(c as i64));
        let right = b.chars().map(|c| -(c as i64));
        left.cmp(right)
    })
}

/// The best description by [`description_order`].
pub fn select_best_description<'a, I>(descriptions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    descriptions
        .into_iter()
        .fold(None, |best, current| match best {
            Some(b) if description_order(current, b) != Ordering::Greater => Some(b),
            _ => Some(current),
        })
}

/// Split an item into its text prefix and trailing number.
///
/// `RNA5S17` sorts as `("RNA5S", Some(17))`, `tRNA-Undet` as
/// `("tRNA-Undet", None)`.
pub fn item_sorter(item: &str) -> (String, Option<u64>) {
    let prefix = item.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &item[prefix.len()..];
    match digits.parse::<u64>() {
        Ok(number) => (prefix.to_string(), Some(number)),
        Err(_) => (item.to_string(), None),
    }
}

/// Collapse sorted numbers into runs of consecutive values.
///
/// Runs of at least three numbers become `(start, Some(stop))`; every other
/// number is reported alone as `(n, None)`.
pub fn group_consecutives<I>(numbers: I) -> Vec<(u64, Option<u64>)>
where
    I: IntoIterator<Item = u64>,
{
    let mut runs: Vec<(u64, u64)> = Vec::new();
    for number in numbers {
        match runs.last_mut() {
            Some((_, stop)) if *stop == number => {}
            Some((_, stop)) if stop.checked_add(1) == Some(number) => *stop = number,
            _ => runs.push((number, number)),
        }
    }

    let mut grouped = Vec::with_capacity(runs.len());
    for (start, stop) in runs {
        if stop - start >= 2 {
            grouped.push((start, Some(stop)));
        } else {
            grouped.extend((start..=stop).map(|n| (n, None)));
        }
    }
    grouped
}

/// Pick the first database in `ordering` with at least one accession the
/// selector accepts, along with all accepted accessions from it.
pub fn best<'a, F>(
    ordering: &[&'static str],
    accessions: &'a [Accession],
    selector: F,
) -> Option<(&'static str, Vec<&'a Accession>)>
where
    F: Fn(&str, &Accession) -> bool,
{
    ordering.iter().find_map(|&db_name| {
        let selected: Vec<&Accession> = accessions
            .iter()
            .filter(|a| selector(db_name, a))
            .collect();
        (!selected.is_empty()).then_some((db_name, selected))
    })
}

/// Strip boilerplate some databases append to descriptions.
pub fn remove_extra_description_terms(description: &str) -> Result<String> {
    let patterns = [
        r"(?i),?\s*(complete|partial) sequence\.?$",
        r"(?i)\s*\(non-protein coding\)",
        r"(?i)\s+(gene|sequence)\.?$",
    ];

    let mut cleaned = description.to_string();
    for pattern in patterns {
        let re = Regex::new(pattern)?;
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    Ok(cleaned)
}

/// Remove a trailing mention of the RNA type, such as the `, microRNA` in
/// `"Homo sapiens microRNA 21 (MIR21), microRNA"`.
pub fn trim_trailing_rna_type(rna_type: &str, description: &str) -> Result<String> {
    let spelled = rna_type.replace('_', " ");
    let mut names = vec![regex::escape(&spelled)];
    if rna_type == "miRNA" || rna_type == "precursor_RNA" {
        names.push("microRNA".to_string());
    }

    let re = Regex::new(&format!(r"(?i),?\s*({})$", names.join("|")))?;
    let trimmed = re.replace(description, "");
    if trimmed.trim().is_empty() {
        return Ok(description.to_string());
    }
    Ok(trimmed.into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn rounded(text: &str) -> f64 {
        (entropy(text) * 1000.0).round() / 1000.0
    }

    #[test]
    fn test_entropy() {
        assert_eq!(rounded("AAAAAAAA"), 0.0);
        assert_eq!(rounded("abc"), 1.585);
        assert_eq!(rounded("A*CP*AP*CP*A"), 1.959);
        assert_eq!(rounded("Homo sapiens tRNA"), 3.735);
        assert_eq!(entropy(""), 0.0);
    }

    #[test]
    fn test_select_best_prefers_entropy() {
        let best = select_best_description([
            "5'-R(*AP*CP*AP*CP*AP*CP*AP*CP*A)-3'",
            "Homo sapiens tRNA",
        ]);
        assert_eq!(best, Some("Homo sapiens tRNA"));
    }

    #[test]
    fn test_select_best_breaks_ties_lexically() {
        // Same characters, so the same entropy
        assert_eq!(select_best_description(["ba", "ab"]), Some("ab"));
        assert_eq!(select_best_description(["ab", "ba"]), Some("ab"));
        assert_eq!(select_best_description(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_item_sorter() {
        assert_eq!(item_sorter("RNA5S17"), ("RNA5S".to_string(), Some(17)));
        assert_eq!(item_sorter("hsa-mir-1302-2"), ("hsa-mir-1302-".to_string(), Some(2)));
        assert_eq!(item_sorter("tRNA-Undet"), ("tRNA-Undet".to_string(), None));
        assert_eq!(item_sorter("12"), ("".to_string(), Some(12)));
    }

    #[test]
    fn test_group_consecutives() {
        assert_eq!(
            group_consecutives([1, 2, 3, 5, 7, 8]),
            vec![(1, Some(3)), (5, None), (7, None), (8, None)]
        );
        assert_eq!(group_consecutives([4, 4]), vec![(4, None)]);
        assert!(group_consecutives(Vec::new()).is_empty());
    }

    #[test]
    fn test_best_uses_ordering() {
        let accessions = vec![
            Accession::new("1", "ENA", "rRNA", "a"),
            Accession::new("2", "RefSeq", "rRNA", "b"),
            Accession::new("3", "ENA", "rRNA", "c"),
        ];
        let (db, selected) = best(&["refseq", "ena"], &accessions, |db, a| a.database == db).unwrap();
        assert_eq!(db, "refseq");
        assert_eq!(selected.len(), 1);

        let (db, selected) = best(&["ena", "refseq"], &accessions, |db, a| a.database == db).unwrap();
        assert_eq!(db, "ena");
        assert_eq!(selected.len(), 2);

        assert!(best(&["rfam"], &accessions, |db, a| a.database == db).is_none());
    }

    #[test]
    fn test_remove_extra_terms() {
        assert_eq!(
            remove_extra_description_terms("Sinumelon nullarboricum 16S ribosomal RNA, partial sequence")
                .unwrap(),
            "Sinumelon nullarboricum 16S ribosomal RNA"
        );
        assert_eq!(
            remove_extra_description_terms("Homo sapiens RNA, 5S ribosomal 1 (non-protein coding)").unwrap(),
            "Homo sapiens RNA, 5S ribosomal 1"
        );
        assert_eq!(
            remove_extra_description_terms("Danio rerio tRNA-Leu gene").unwrap(),
            "Danio rerio tRNA-Leu"
        );
        assert_eq!(remove_extra_description_terms("Danio rerio tRNA").unwrap(), "Danio rerio tRNA");
    }

    #[test]
    fn test_trim_trailing_rna_type() {
        assert_eq!(
            trim_trailing_rna_type("miRNA", "Homo sapiens microRNA 21 (MIR21), microRNA").unwrap(),
            "Homo sapiens microRNA 21 (MIR21)"
        );
        assert_eq!(
            trim_trailing_rna_type("telomerase_RNA", "Bos taurus telomerase RNA component (TERC), telomerase RNA")
                .unwrap(),
            "Bos taurus telomerase RNA component (TERC)"
        );
        assert_eq!(trim_trailing_rna_type("rRNA", "rRNA").unwrap(), "rRNA");
    }
}
