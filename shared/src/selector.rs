//! A small CSS selector engine.
//!
//! Covers what page decoration needs: selector lists, type/universal, `#id`
//! and `.class` parts, and the descendant and child combinators. Pseudo
//! classes, attribute selectors and sibling combinators are rejected.

use std::{fmt, str::FromStr};

use crate::{dom::DomElement, error::SelectorError};

/// One compound selector such as `div#toc.open`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches<E: DomElement>(&self, element: &E) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| element.has_class(class))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// A chain of compounds joined by combinators, e.g. `#toc > ul a`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
    // combinators[i] joins compounds[i] and compounds[i + 1]
    combinators: Vec<Combinator>,
}

impl Complex {
    fn matches<E: DomElement>(&self, element: &E) -> bool {
        self.matches_at(element, self.compounds.len() - 1)
    }

    fn matches_at<E: DomElement>(&self, element: &E, index: usize) -> bool {
        if !self.compounds[index].matches(element) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match self.combinators[index - 1] {
            Combinator::Child => element
                .parent_element()
                .is_some_and(|parent| self.matches_at(&parent, index - 1)),
            Combinator::Descendant => {
                let mut ancestor = element.parent_element();
                while let Some(current) = ancestor {
                    if self.matches_at(&current, index - 1) {
                        return true;
                    }
                    ancestor = current.parent_element();
                }
                false
            },
        }
    }
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    source: String,
    selectors: Vec<Complex>,
}

impl SelectorList {
    /// Parse a selector list such as `h1, h2` or `#toc a`.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let selectors = Parser::new(input).parse_list()?;
        Ok(Self {
            source: input.trim().to_string(),
            selectors,
        })
    }

    /// The selector text, suitable for handing to a native matcher.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `element` matches any selector of the list.
    pub fn matches<E: DomElement>(&self, element: &E) -> bool {
        self.selectors.iter().any(|selector| selector.matches(element))
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos > start
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        self.input[start..self.pos].to_string()
    }

    fn parse_list(&mut self) -> Result<Vec<Complex>, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.peek() {
                None => return Ok(selectors),
                Some(',') => self.bump(),
                Some(found) => {
                    return Err(SelectorError::Unexpected {
                        found,
                        offset: self.pos,
                    })
                },
            }
        }
    }

    fn parse_complex(&mut self) -> Result<Complex, SelectorError> {
        self.skip_whitespace();
        let first = match self.parse_compound()? {
            Some(compound) => compound,
            None => return Err(self.nothing_parsed()),
        };
        let mut complex = Complex {
            compounds: vec![first],
            combinators: Vec::new(),
        };

        loop {
            let had_whitespace = self.skip_whitespace();
            match self.peek() {
                None | Some(',') => return Ok(complex),
                Some('>') => {
                    let offset = self.pos;
                    self.bump();
                    self.skip_whitespace();
                    let next = self
                        .parse_compound()?
                        .ok_or(SelectorError::DanglingCombinator {
                            offset,
                        })?;
                    complex.combinators.push(Combinator::Child);
                    complex.compounds.push(next);
                },
                Some(found) if had_whitespace => match self.parse_compound()? {
                    Some(next) => {
                        complex.combinators.push(Combinator::Descendant);
                        complex.compounds.push(next);
                    },
                    None => {
                        return Err(SelectorError::Unexpected {
                            found,
                            offset: self.pos,
                        })
                    },
                },
                Some(found) => {
                    return Err(SelectorError::Unexpected {
                        found,
                        offset: self.pos,
                    })
                },
            }
        }
    }

    /// `Ok(None)` when no part of a compound starts at the cursor.
    fn parse_compound(&mut self) -> Result<Option<Compound>, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();

        match self.peek() {
            Some('*') => self.bump(),
            Some(c) if is_ident_start(c) => compound.tag = Some(self.ident().to_ascii_lowercase()),
            _ => {},
        }

        while let Some(prefix @ ('#' | '.')) = self.peek() {
            let offset = self.pos;
            self.bump();
            let name = self.ident();
            if name.is_empty() {
                return Err(SelectorError::MissingName {
                    prefix,
                    offset,
                });
            }
            if !is_identifier(&name) {
                return Err(SelectorError::InvalidName {
                    name,
                    offset,
                });
            }
            if prefix == '#' {
                compound.id = Some(name);
            } else {
                compound.classes.push(name);
            }
        }

        Ok((self.pos > start).then_some(compound))
    }

    fn nothing_parsed(&self) -> SelectorError {
        match self.peek() {
            None | Some(',') => SelectorError::Empty,
            Some(found) => SelectorError::Unexpected {
                found,
                offset: self.pos,
            },
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn is_ident_start(c: char) -> bool {
    is_ident_char(c) && !c.is_ascii_digit()
}

/// Whether `name` can follow `#` or `.` in a selector without escaping.
///
/// CSS identifiers may not start with a digit or with `-` followed by a digit.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let valid_start = match chars.next() {
        Some('-') => chars.next().is_some_and(|second| second == '-' || is_ident_start(second)),
        Some(first) => is_ident_start(first),
        None => false,
    };
    valid_start && name.chars().all(is_ident_char)
}
