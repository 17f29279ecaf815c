use std::cmp::Ordering;
use std::fmt;

use anyhow::{ensure, Context, Result};
use thiserror::Error;

pub fn day13(input: &str) -> Result<(usize, usize)> {
    let pairs = parse_pairs(input)?;

    // a pair is in order unless the comparison is decisively Greater
    let part1 = pairs
        .iter()
        .enumerate()
        .filter(|(_, (left, right))| left.cmp(right) != Ordering::Greater)
        .map(|(index, _)| index + 1)
        .sum();

    let part2 = decoder_key(pairs)?;

    Ok((part1, part2))
}

/// One node of a packet: an integer or a nested list.
#[derive(Debug, Clone)]
pub enum Element {
    Int(i64),
    List(Vec<Element>),
}

impl Ord for Element {
    /// The ordering rule: `Less` and `Greater` are decisive, `Equal` means
    /// the comparison continues with the next element. Integers compare
    /// numerically, lists elementwise with the shorter list first on
    /// exhaustion, and a lone integer is promoted to a one-element list.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Element::Int(left), Element::Int(right)) => left.cmp(right),
            (Element::List(left), Element::List(right)) => compare_lists(left, right),
            (Element::Int(left), Element::List(right)) => {
                compare_lists(&[Element::Int(*left)], right)
            }
            (Element::List(left), Element::Int(right)) => {
                compare_lists(left, &[Element::Int(*right)])
            }
        }
    }
}

fn compare_lists(left: &[Element], right: &[Element]) -> Ordering {
    for (left, right) in left.iter().zip(right) {
        match left.cmp(right) {
            Ordering::Equal => {}
            decisive => return decisive,
        }
    }
    left.len().cmp(&right.len())
}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// equality must agree with the comparator, so [1] equals [[1]]
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Element {}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Int(value) => write!(f, "{}", value),
            Element::List(elements) => write_list(f, elements),
        }
    }
}

/// Top-level packet; the root is always a list. `Display` reconstructs the
/// canonical bracketed text.
#[derive(Debug, Clone)]
pub struct Packet(Vec<Element>);

impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lists(&self.0, &other.0)
    }
}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Packet {}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.0)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, elements: &[Element]) -> fmt::Result {
    f.write_str("[")?;
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", element)?;
    }
    f.write_str("]")
}

#[derive(Debug, Error, PartialEq)]
pub enum PacketParseError {
    #[error("empty packet line")]
    Empty,
    #[error("packet must start with '[', found {found:?}")]
    RootNotList { found: String },
    #[error("unbalanced brackets in {packet:?}")]
    UnbalancedBracket { packet: String },
    #[error("invalid token at byte {position}: {fragment:?}")]
    InvalidToken { position: usize, fragment: String },
    #[error("trailing characters after packet: {fragment:?}")]
    TrailingInput { fragment: String },
}

/// Byte position threaded through the recursive-descent parser.
struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn bump(&mut self) {
        self.position += 1;
    }

    fn fragment(&self) -> String {
        self.input[self.position..].chars().take(12).collect()
    }

    fn invalid_token(&self) -> PacketParseError {
        PacketParseError::InvalidToken {
            position: self.position,
            fragment: self.fragment(),
        }
    }
}

impl Packet {
    pub fn parse(text: &str) -> Result<Packet, PacketParseError> {
        let mut cursor = Cursor {
            input: text,
            position: 0,
        };
        match cursor.peek() {
            Some(b'[') => cursor.bump(),
            Some(_) => {
                return Err(PacketParseError::RootNotList {
                    found: cursor.fragment(),
                })
            }
            None => return Err(PacketParseError::Empty),
        }
        let elements = parse_list(&mut cursor)?;
        if cursor.position != text.len() {
            return Err(PacketParseError::TrailingInput {
                fragment: cursor.fragment(),
            });
        }
        Ok(Packet(elements))
    }
}

/// Parses the elements after an opening `[` and consumes the closing `]`.
fn parse_list(cursor: &mut Cursor<'_>) -> Result<Vec<Element>, PacketParseError> {
    let mut elements = Vec::new();
    loop {
        match cursor.peek() {
            Some(b']') => {
                cursor.bump();
                return Ok(elements);
            }
            None => {
                return Err(PacketParseError::UnbalancedBracket {
                    packet: cursor.input.to_string(),
                })
            }
            _ => {}
        }
        if !elements.is_empty() {
            if cursor.peek() == Some(b',') {
                cursor.bump();
            } else {
                return Err(cursor.invalid_token());
            }
        }
        elements.push(parse_element(cursor)?);
    }
}

fn parse_element(cursor: &mut Cursor<'_>) -> Result<Element, PacketParseError> {
    match cursor.peek() {
        Some(b'[') => {
            cursor.bump();
            Ok(Element::List(parse_list(cursor)?))
        }
        Some(b'-' | b'0'..=b'9') => parse_int(cursor),
        _ => Err(cursor.invalid_token()),
    }
}

fn parse_int(cursor: &mut Cursor<'_>) -> Result<Element, PacketParseError> {
    let start = cursor.position;
    if cursor.peek() == Some(b'-') {
        cursor.bump();
    }
    while matches!(cursor.peek(), Some(b'0'..=b'9')) {
        cursor.bump();
    }
    let literal = &cursor.input[start..cursor.position];
    literal
        .parse()
        .map(Element::Int)
        .map_err(|_| PacketParseError::InvalidToken {
            position: start,
            fragment: literal.to_string(),
        })
}

fn parse_pairs(input: &str) -> Result<Vec<(Packet, Packet)>> {
    let packets = input
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| Packet::parse(line).with_context(|| format!("bad packet line {:?}", line)))
        .collect::<Result<Vec<_>>>()?;
    ensure!(
        packets.len() % 2 == 0,
        "odd number of packets: {}",
        packets.len()
    );

    let mut packets = packets.into_iter();
    let mut pairs = Vec::new();
    while let (Some(left), Some(right)) = (packets.next(), packets.next()) {
        pairs.push((left, right));
    }
    Ok(pairs)
}

/// Sorts every packet together with the two divider packets and multiplies
/// the dividers' 1-based positions. Dividers are recognized by a marker
/// attached at insertion time, not by comparing content, so a payload packet
/// that happens to read `[[2]]` cannot be miscounted.
fn decoder_key(pairs: Vec<(Packet, Packet)>) -> Result<usize> {
    let mut entries = Vec::with_capacity(pairs.len() * 2 + 2);
    for (left, right) in pairs {
        entries.push((left, false));
        entries.push((right, false));
    }
    for divider in ["[[2]]", "[[6]]"] {
        entries.push((Packet::parse(divider)?, true));
    }

    // stable sort: packets comparing equal keep their relative order
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    Ok(entries
        .iter()
        .enumerate()
        .filter(|(_, (_, divider))| *divider)
        .map(|(index, _)| index + 1)
        .product())
}
