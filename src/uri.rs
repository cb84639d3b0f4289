//! Relative-reference resolution for DOCTYPE system identifiers.
//!
//! The parser only ever needs to absolutize a SYSTEM id against the
//! document base, so this module carries just the reference-resolution
//! algorithm of RFC 3986 section 5 over plain strings.

struct Components<'a> {
    scheme: Option<&'a str>,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

fn split_uri(uri: &str) -> Components<'_> {
    let (rest, fragment) = match uri.split_once('#') {
        Some((r, f)) => (r, Some(f)),
        None => (uri, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((r, q)) => (r, Some(q)),
        None => (rest, None),
    };
    let (scheme, rest) = match rest.split_once(':') {
        // A scheme must start with a letter and precede any '/'.
        Some((s, r))
            if !s.is_empty()
                && s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            (Some(s), r)
        }
        _ => (None, rest),
    };
    let (authority, path) = match rest.strip_prefix("//") {
        Some(r) => match r.find('/') {
            Some(i) => (Some(&r[..i]), &r[i..]),
            None => (Some(r), ""),
        },
        None => (None, rest),
    };
    Components {
        scheme,
        authority,
        path,
        query,
        fragment,
    }
}

/// ```text
/// 5.2.4. Remove Dot Segments
/// ```
fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = vec![];
    let absolute = path.starts_with('/');
    let trailing_slash = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");
    for segment in path.split('/') {
        match segment {
            "." | "" => {}
            ".." => {
                output.pop();
            }
            other => output.push(other),
        }
    }
    let mut result = String::new();
    if absolute {
        result.push('/');
    }
    result.push_str(&output.join("/"));
    if trailing_slash && !result.ends_with('/') {
        result.push('/');
    }
    result
}

/// ```text
/// 5.3. Component Recomposition
/// ```
fn recompose(c: &Components<'_>, path: &str) -> String {
    let mut result = String::new();
    if let Some(scheme) = c.scheme {
        result.push_str(scheme);
        result.push(':');
    }
    if let Some(authority) = c.authority {
        result.push_str("//");
        result.push_str(authority);
    }
    result.push_str(path);
    if let Some(query) = c.query {
        result.push('?');
        result.push_str(query);
    }
    if let Some(fragment) = c.fragment {
        result.push('#');
        result.push_str(fragment);
    }
    result
}

/// Resolve `reference` against `base`.
///
/// ```text
/// 5.2.2. Transform References
/// ```
///
/// If `base` is empty or `reference` already carries a scheme, the
/// reference is returned as given (modulo dot-segment removal).
pub fn resolve(base: &str, reference: &str) -> String {
    let r = split_uri(reference);
    if base.is_empty() || r.scheme.is_some() {
        return recompose(&r, &remove_dot_segments(r.path));
    }
    let b = split_uri(base);

    if r.authority.is_some() {
        let target = Components {
            scheme: b.scheme,
            ..split_uri(reference)
        };
        return recompose(&target, &remove_dot_segments(r.path));
    }

    if r.path.is_empty() {
        return recompose(
            &Components {
                scheme: b.scheme,
                authority: b.authority,
                path: "",
                query: r.query.or(b.query),
                fragment: r.fragment,
            },
            b.path,
        );
    }

    let merged;
    let path = if r.path.starts_with('/') {
        r.path
    } else {
        // 5.2.3. Merge Paths
        merged = match b.path.rfind('/') {
            Some(i) => format!("{}{}", &b.path[..=i], r.path),
            None if b.authority.is_some() => format!("/{}", r.path),
            None => r.path.to_owned(),
        };
        &merged
    };
    recompose(
        &Components {
            scheme: b.scheme,
            authority: b.authority,
            path: "",
            query: r.query,
            fragment: r.fragment,
        },
        &remove_dot_segments(path),
    )
}

#[cfg(test)]
mod tests {
    use super::resolve;

    const BASE: &str = "http://a/b/c/d;p?q";

    #[test]
    fn normal_references() {
        assert_eq!(resolve(BASE, "g"), "http://a/b/c/g");
        assert_eq!(resolve(BASE, "./g"), "http://a/b/c/g");
        assert_eq!(resolve(BASE, "g/"), "http://a/b/c/g/");
        assert_eq!(resolve(BASE, "/g"), "http://a/g");
        assert_eq!(resolve(BASE, "//g"), "http://g");
        assert_eq!(resolve(BASE, "../g"), "http://a/b/g");
        assert_eq!(resolve(BASE, "../../g"), "http://a/g");
        assert_eq!(resolve(BASE, "g?y"), "http://a/b/c/g?y");
    }

    #[test]
    fn absolute_reference_wins() {
        assert_eq!(
            resolve(BASE, "http://example.org/x.dtd"),
            "http://example.org/x.dtd"
        );
    }

    #[test]
    fn empty_base() {
        assert_eq!(resolve("", "strict.dtd"), "strict.dtd");
    }
}
