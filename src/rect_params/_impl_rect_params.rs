use crate::rect_params::{RectParams, Rectangle};
use std::fmt::{Display, Formatter};

impl RectParams {
    /// True if this value is one of the canonical forms (`True`, `False` or `Rectangles`).
    pub fn is_canonical(&self) -> bool {
        matches!(
            self,
            RectParams::True | RectParams::False | RectParams::Rectangles(_)
        )
    }

    /// The rectangles of an explicit `Rectangles` value, `None` for any other variant.
    pub fn as_rectangles(&self) -> Option<&[Rectangle]> {
        match self {
            RectParams::Rectangles(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Display for RectParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RectParams::True => write!(f, "true"),
            RectParams::False => write!(f, "false"),
            RectParams::Rectangles(items) => write_list(f, items, " | "),
            RectParams::And(items) => write_list(f, items, " & "),
            RectParams::Or(items) => write_list(f, items, " | "),
            RectParams::Not(inner) => write!(f, "!{}", inner),
        }
    }
}

/// **(internal)** Write a parenthesised list of items joined by a separator.
fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T], separator: &str) -> std::fmt::Result {
    write!(f, "(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, ")")
}
