//! Minimal EDN value model and printer.
//!
//! Only the forms `deps.edn` needs are modelled. Maps keep their entries in
//! insertion order; callers sort them when they need a canonical order.

use std::fmt;

/// Line width the pretty printer aims for.
pub const DEFAULT_WIDTH: usize = 80;

/// An EDN value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edn {
    /// `"..."`
    Str(String),
    /// `:name`, stored without the leading colon
    Keyword(String),
    /// `name` or `ns/name`
    Symbol(String),
    /// `[...]`
    Vector(Vec<Edn>),
    /// `{...}`
    Map(Vec<(Edn, Edn)>),
}

impl Edn {
    pub fn string(s: impl Into<String>) -> Self {
        Edn::Str(s.into())
    }

    pub fn keyword(name: impl Into<String>) -> Self {
        Edn::Keyword(name.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Edn::Symbol(name.into())
    }

    /// A vector of strings.
    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Edn::Vector(items.into_iter().map(Edn::string).collect())
    }

    /// Look up a map entry by keyword name.
    pub fn get(&self, keyword: &str) -> Option<&Edn> {
        match self {
            Edn::Map(entries) => entries.iter().find_map(|(k, v)| match k {
                Edn::Keyword(name) if name == keyword => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }

    fn is_collection(&self) -> bool {
        matches!(self, Edn::Vector(_) | Edn::Map(_))
    }

    /// Render across several lines, breaking collections that do not fit `width`.
    ///
    /// The output is a pure function of the value and the width.
    pub fn to_pretty_string(&self, width: usize) -> String {
        let mut out = String::new();
        write_pretty(self, 0, width, &mut out);
        out
    }
}

fn write_pretty(value: &Edn, column: usize, width: usize, out: &mut String) {
    let flat = value.to_string();
    if !value.is_collection() || column + flat.chars().count() <= width {
        out.push_str(&flat);
        return;
    }

    let inner = column + 1;
    match value {
        Edn::Vector(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    newline(out, inner);
                }
                write_pretty(item, inner, width, out);
            }
            out.push(']');
        }
        Edn::Map(entries) => {
            out.push('{');
            for (i, (key, val)) in entries.iter().enumerate() {
                if i > 0 {
                    newline(out, inner);
                }
                let key = key.to_string();
                out.push_str(&key);

                let value_column = inner + key.chars().count() + 1;
                let val_flat = val.to_string();
                if !val.is_collection() || value_column + val_flat.chars().count() <= width {
                    out.push(' ');
                    out.push_str(&val_flat);
                } else {
                    newline(out, inner);
                    write_pretty(val, inner, width, out);
                }
            }
            out.push('}');
        }
        _ => out.push_str(&flat),
    }
}

fn newline(out: &mut String, indent: usize) {
    out.push('\n');
    out.extend(std::iter::repeat(' ').take(indent));
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Edn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edn::Str(s) => write_escaped(f, s),
            Edn::Keyword(name) => write!(f, ":{}", name),
            Edn::Symbol(name) => f.write_str(name),
            Edn::Vector(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Edn::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}
