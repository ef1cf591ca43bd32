//! Station identity types.

use std::fmt;

/// Line label carried by the synthetic start vertex of an itinerary query.
///
/// Never a real line name: real lines are plain labels such as `"3"` or
/// `"7bis"`, while meta labels carry the `meta:` prefix.
pub const META_LINE_START: &str = "meta:start";

/// Line label carried by the synthetic end vertex of an itinerary query.
pub const META_LINE_END: &str = "meta:end";

/// A station on a specific line.
///
/// Two stations with the same name on different lines are distinct
/// vertices: "République" on line 3 and "République" on line 11 are
/// different values that the network connects with interchange edges.
/// Equality and hashing cover both the name and the line.
///
/// # Examples
///
/// ```
/// use metro_server::domain::Station;
///
/// let a = Station::new("République", "3");
/// let b = Station::new("République", "11");
/// assert_ne!(a, b);
/// assert_eq!(a.name(), b.name());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Station {
    name: String,
    line: String,
}

impl Station {
    /// Create a station on a line.
    pub fn new(name: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line: line.into(),
        }
    }

    /// The synthetic, line-agnostic start vertex for an itinerary query on
    /// the named station.
    pub fn meta_start(name: impl Into<String>) -> Self {
        Self::new(name, META_LINE_START)
    }

    /// The synthetic, line-agnostic end vertex for an itinerary query.
    pub fn meta_end(name: impl Into<String>) -> Self {
        Self::new(name, META_LINE_END)
    }

    /// The station name shared by all line variants.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The line this vertex belongs to, or a meta sentinel.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// True for the synthetic start/end vertices spliced in per query.
    pub fn is_meta(&self) -> bool {
        self.line == META_LINE_START || self.line == META_LINE_END
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({} @ {})", self.name, self.line)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.name, self.line)
    }
}
