use url::Url;

/// Page number of the `rel="last"` entry in a `Link` header.
///
/// Endpoints are queried with `per_page=1`, so the last page number doubles as the item
/// count. A single page of results carries no `last` relation and yields 0, as does a
/// missing or malformed header.
pub fn last_page(link_header: Option<&str>) -> u64 {
    link_header
        .into_iter()
        .flat_map(|header| header.split(','))
        .filter_map(parse_link)
        .find(|(_, rels)| rels.iter().any(|rel| *rel == "last"))
        .and_then(|(target, _)| page_param(target))
        .unwrap_or(0)
}

/// Splits `<url>; rel="next last"` into the target and its relation names.
fn parse_link(entry: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = entry.split(';');
    let target = parts
        .next()?
        .trim()
        .strip_prefix('<')?
        .strip_suffix('>')?;

    let rels = parts
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            (key.trim() == "rel").then(|| value.trim().trim_matches('"'))
        })
        .flat_map(str::split_whitespace)
        .collect();

    Some((target, rels))
}

fn page_param(target: &str) -> Option<u64> {
    let url = Url::parse(target).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_from_github_header() {
        let header = "<https://api.github.com/repositories/1300192/contributors?per_page=1&page=2>; rel=\"next\", \
                      <https://api.github.com/repositories/1300192/contributors?per_page=1&page=347>; rel=\"last\"";

        assert_eq!(last_page(Some(header)), 347);
    }

    #[test]
    fn test_last_page_when_last_is_listed_first() {
        let header = "<https://api.github.com/repos/o/r/pulls?page=9&per_page=1&state=all>; rel=\"last\", \
                      <https://api.github.com/repos/o/r/pulls?page=2&per_page=1&state=all>; rel=\"next\"";

        assert_eq!(last_page(Some(header)), 9);
    }

    #[test]
    fn test_last_page_without_header_is_zero() {
        assert_eq!(last_page(None), 0);
    }

    #[test]
    fn test_single_page_reports_zero() {
        // Exactly one contributor: GitHub sends no Link header at all, or only prev/first
        // relations on later pages. Either way the count degrades to 0.
        let header = "<https://api.github.com/repos/o/r/contributors?per_page=1&page=1>; rel=\"first\"";

        assert_eq!(last_page(Some(header)), 0);
    }

    #[test]
    fn test_malformed_header_is_zero() {
        assert_eq!(last_page(Some("")), 0);
        assert_eq!(last_page(Some("garbage; rel=\"last\"")), 0);
        assert_eq!(last_page(Some("<not a url>; rel=\"last\"")), 0);
        assert_eq!(
            last_page(Some("<https://api.github.com/x?page=abc>; rel=\"last\"")),
            0
        );
    }

    #[test]
    fn test_multiple_relations_in_one_entry() {
        let header = "<https://api.github.com/x?per_page=1&page=5>; rel=\"next last\"";

        assert_eq!(last_page(Some(header)), 5);
    }
}
