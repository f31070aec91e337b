/// A reserved character introducing one fragment of a declaration token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `$`: the `const` value.
    Const,
    /// `#`: the nargs (a count, or one of `?`, `*`, `+`, `R`).
    Nargs,
    /// `@`: the action name.
    Action,
    /// `=`: the default value.
    Default,
    /// `{`: the destination.
    Dest,
    /// `[`: the type name.
    Type,
    /// `(`: the long name.
    LongName,
}

/// Marks the option as required.
/// Handled before any fragment is extracted, so it may appear anywhere in the token.
pub const REQUIRED: char = '!';

impl Marker {
    /// Every marker, in the order fragments are extracted from a token.
    pub const ALL: [Marker; 7] = [
        Marker::Const,
        Marker::Nargs,
        Marker::Action,
        Marker::Default,
        Marker::Dest,
        Marker::Type,
        Marker::LongName,
    ];

    /// The character introducing this fragment.
    pub fn symbol(&self) -> char {
        match self {
            Marker::Const => '$',
            Marker::Nargs => '#',
            Marker::Action => '@',
            Marker::Default => '=',
            Marker::Dest => '{',
            Marker::Type => '[',
            Marker::LongName => '(',
        }
    }

    /// The marker introduced by `symbol`, if any.
    pub fn from_symbol(symbol: char) -> Option<Marker> {
        Marker::ALL
            .into_iter()
            .find(|marker| marker.symbol() == symbol)
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The result of pulling one fragment out of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The token with the marker and its capture removed.
    pub remaining: String,
    /// The text following the marker, or `None` when the marker is absent.
    pub captured: Option<String>,
}

/// Pull the fragment introduced by `marker` out of `token`.
///
/// The capture runs from just after the first occurrence of `marker` up to (but excluding) the next marker character of any kind, or to the end of the token.
/// There is no escaping: a marker character always ends a capture.
///
/// ### Example
/// ```
/// use qarg::{extract, Marker};
///
/// let extraction = extract("f[int(foo", Marker::Type);
/// assert_eq!(extraction.remaining, "f(foo");
/// assert_eq!(extraction.captured.as_deref(), Some("int"));
///
/// let extraction = extract("f(foo", Marker::Type);
/// assert_eq!(extraction.remaining, "f(foo");
/// assert_eq!(extraction.captured, None);
/// ```
pub fn extract(token: &str, marker: Marker) -> Extraction {
    let start = match token.find(marker.symbol()) {
        Some(start) => start,
        None => {
            return Extraction {
                remaining: token.to_string(),
                captured: None,
            };
        }
    };
    let value_start = start + marker.symbol().len_utf8();
    let end = token[value_start..]
        .find(|c: char| Marker::from_symbol(c).is_some())
        .map(|offset| value_start + offset)
        .unwrap_or(token.len());

    Extraction {
        remaining: format!("{}{}", &token[..start], &token[end..]),
        captured: Some(token[value_start..end].to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn marker_symbols() {
        let symbols: String = Marker::ALL.iter().map(Marker::symbol).collect();
        assert_eq!(symbols, "$#@={[(");

        for marker in Marker::ALL {
            assert_eq!(Marker::from_symbol(marker.symbol()), Some(marker));
            assert_eq!(marker.to_string(), marker.symbol().to_string());
        }

        assert_eq!(Marker::from_symbol('f'), None);
        assert_eq!(Marker::from_symbol(REQUIRED), None);
    }

    #[rstest]
    #[case("f", Marker::Type, "f", None)]
    #[case("", Marker::Type, "", None)]
    #[case("f[int", Marker::Type, "f", Some("int"))]
    #[case("f[int(foo", Marker::Type, "f(foo", Some("int"))]
    #[case("f(foo[int", Marker::Type, "f(foo", Some("int"))]
    #[case("f(foo[int=1", Marker::Type, "f(foo=1", Some("int"))]
    #[case("f[", Marker::Type, "f", Some(""))]
    #[case("f[(foo", Marker::Type, "f(foo", Some(""))]
    #[case("[int", Marker::Type, "", Some("int"))]
    #[case("f[int[str", Marker::Type, "f[str", Some("int"))]
    #[case("f=a b", Marker::Default, "f", Some("a b"))]
    #[case("f=é(foo", Marker::Default, "f(foo", Some("é"))]
    #[case("foo#R", Marker::Nargs, "foo", Some("R"))]
    fn extract_fragment(
        #[case] token: &str,
        #[case] marker: Marker,
        #[case] remaining: &str,
        #[case] captured: Option<&str>,
    ) {
        assert_eq!(
            extract(token, marker),
            Extraction {
                remaining: remaining.to_string(),
                captured: captured.map(str::to_string),
            }
        );
    }

    #[test]
    fn extract_every_marker_at_end() {
        for marker in Marker::ALL {
            // Setup
            let token = format!("f{}value", marker.symbol());

            // Execute
            let extraction = extract(&token, marker);

            // Verify
            assert_eq!(extraction.remaining, "f");
            assert_eq!(extraction.captured.as_deref(), Some("value"));
        }
    }

    #[test]
    fn extract_stops_at_every_marker() {
        for marker in Marker::ALL {
            for terminator in Marker::ALL {
                // Setup
                let token = format!("f{}abc{}xyz", marker.symbol(), terminator.symbol());

                // Execute
                let extraction = extract(&token, marker);

                // Verify
                assert_eq!(extraction.captured.as_deref(), Some("abc"));
                assert_eq!(
                    extraction.remaining,
                    format!("f{}xyz", terminator.symbol())
                );
            }
        }
    }
}
