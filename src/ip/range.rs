//! IP range specification parsing.
//!
//! Converts the free-text range fields of a deployment into ordered address
//! lists. Supported notations:
//! - Single address: `192.168.1.10`
//! - Dash range: `192.168.1.10-192.168.1.20`
//! - Shorthand dash range: `192.168.1.10-20`
//! - CIDR block: `192.168.1.0/24` (usable hosts only)
//!
//! Any mix of comma, semicolon (ASCII or full-width), whitespace, tab and
//! newline separates specifications inside one field.
//!
//! There are two layers. The plain parsers (`parse_specification`,
//! `parse_list`) never fail: bad segments log a warning and contribute
//! nothing. The diagnostic parsers (`parse_list_collecting`, `validate_list`)
//! report every bad segment as a message instead.

use super::pool::{AddressBlock, AddressList};
use ipnet::Ipv4Net;
use log::warn;
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

/// Separator characters accepted between specifications
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;，；\s]+").expect("Invalid separator regex"));

/// Whitespace around range operators, so `a - b` stays one segment
static OPERATOR_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([-/])\s*").expect("Invalid operator spacing regex"));

/// Canonical separator used after normalization
pub const CANONICAL_SEPARATOR: char = ',';

/// Errors produced while parsing a single range specification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Malformed IP address: '{0}'")]
    MalformedAddress(String),

    #[error("Invalid IP range format: '{0}'")]
    InvalidRangeFormat(String),

    #[error("Reversed IP range: start address {start} is greater than end address {end}")]
    ReversedRange { start: Ipv4Addr, end: Ipv4Addr },

    #[error("Invalid CIDR block: '{0}'")]
    InvalidCidr(String),

    #[error("Unrecognized IP specification: '{0}'")]
    Unrecognized(String),
}

/// Result of a diagnostic parse: every address that could be parsed plus
/// one message per problem found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedList {
    pub addresses: AddressList,
    pub errors: Vec<String>,
}

impl ParsedList {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse exactly four dot-separated decimal octets.
///
/// Octets must be 0-255 and written without leading zeros, so `01` is
/// rejected even though it is numerically in range.
///
/// # Examples
/// ```
/// use vdiplan::ip::range::parse_address;
///
/// assert!(parse_address("192.168.1.10").is_ok());
/// assert!(parse_address("192.168.01.10").is_err());
/// assert!(parse_address("256.0.0.1").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<Ipv4Addr, RangeError> {
    let trimmed = text.trim();
    let malformed = || RangeError::MalformedAddress(trimmed.to_string());

    let mut octets = [0u8; 4];
    let mut count = 0;
    for part in trimmed.split('.') {
        if count == 4 {
            return Err(malformed());
        }
        octets[count] = parse_octet(part).ok_or_else(malformed)?;
        count += 1;
    }
    if count != 4 {
        return Err(malformed());
    }

    Ok(Ipv4Addr::from(octets))
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse::<u8>().ok()
}

/// Unsigned 32-bit value of an address
pub fn address_to_int(addr: Ipv4Addr) -> u32 {
    u32::from(addr)
}

/// Address for an unsigned 32-bit value
pub fn int_to_address(value: u32) -> Ipv4Addr {
    Ipv4Addr::from(value)
}

/// Expand an inclusive range.
///
/// A reversed range yields an empty list and a logged warning; use
/// `validate_list` when the caller needs the condition reported.
pub fn expand_range(start: Ipv4Addr, end: Ipv4Addr) -> AddressList {
    match AddressBlock::new(start, end) {
        Some(block) => AddressList::from(block),
        None => {
            warn!("Start address {} is greater than end address {}, range ignored", start, end);
            AddressList::new()
        }
    }
}

/// Resolve the two endpoints of a dash range without expanding it.
///
/// The text is split on the first dash. A right-hand side with fewer than
/// three dots is a shorthand tail and inherits the first three octets of
/// the left-hand side (`10.0.0.5-9` ends at `10.0.0.9`).
pub fn dash_range_bounds(text: &str) -> Result<(Ipv4Addr, Ipv4Addr), RangeError> {
    let trimmed = text.trim();
    let invalid = || RangeError::InvalidRangeFormat(trimmed.to_string());

    let (left, right) = trimmed.split_once('-').ok_or_else(invalid)?;
    let (left, right) = (left.trim(), right.trim());

    let start = parse_address(left).map_err(|_| invalid())?;
    let end = if right.matches('.').count() < 3 {
        let [a, b, c, _] = start.octets();
        parse_address(&format!("{}.{}.{}.{}", a, b, c, right)).map_err(|_| invalid())?
    } else {
        parse_address(right).map_err(|_| invalid())?
    };

    Ok((start, end))
}

/// Parse and expand a dash range.
///
/// # Examples
/// ```
/// use vdiplan::ip::range::parse_dash_range;
///
/// let list = parse_dash_range("10.0.0.1-3").unwrap();
/// assert_eq!(list.to_strings(), vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
///
/// // Reversed ranges are not an error here, they are simply empty
/// assert!(parse_dash_range("10.0.0.9-10.0.0.1").unwrap().is_empty());
/// ```
pub fn parse_dash_range(text: &str) -> Result<AddressList, RangeError> {
    let (start, end) = dash_range_bounds(text)?;
    Ok(expand_range(start, end))
}

/// Number of usable host addresses in a block with the given prefix length.
///
/// Network and broadcast addresses are excluded, so /31 and /32 hold none.
pub fn cidr_host_count(prefix_len: u8) -> u64 {
    if prefix_len >= 31 {
        0
    } else {
        (1u64 << (32 - u32::from(prefix_len))) - 2
    }
}

/// Parse a CIDR block into its usable host addresses.
///
/// The base address may sit anywhere inside the block; the block itself is
/// derived from the prefix length.
pub fn parse_cidr_block(text: &str) -> Result<AddressList, RangeError> {
    let trimmed = text.trim();
    let invalid = || RangeError::InvalidCidr(trimmed.to_string());

    let (base, prefix) = trimmed.split_once('/').ok_or_else(invalid)?;
    let base = parse_address(base).map_err(|_| invalid())?;
    let prefix = prefix.trim();
    if prefix.is_empty() || prefix.len() > 2 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let prefix_len: u8 = prefix.parse().map_err(|_| invalid())?;
    let net = Ipv4Net::new(base, prefix_len).map_err(|_| invalid())?;

    if cidr_host_count(prefix_len) == 0 {
        return Ok(AddressList::new());
    }

    let first = int_to_address(address_to_int(net.network()) + 1);
    let last = int_to_address(address_to_int(net.broadcast()) - 1);
    Ok(expand_range(first, last))
}

/// Parse one specification into addresses, never failing.
///
/// Dispatches on `/` (CIDR), then `-` (dash range), otherwise a single
/// address. Anything unparseable yields an empty list and a warning.
pub fn parse_specification(text: &str) -> AddressList {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return AddressList::new();
    }

    let parsed = if trimmed.contains('/') {
        parse_cidr_block(trimmed)
    } else if trimmed.contains('-') {
        parse_dash_range(trimmed)
    } else {
        parse_address(trimmed).map(|addr| AddressList::from(AddressBlock::single(addr)))
    };

    parsed.unwrap_or_else(|e| {
        warn!("Ignoring IP specification '{}': {}", trimmed, e);
        AddressList::new()
    })
}

/// Parse one segment and report every problem as an error, including
/// reversed ranges
fn parse_segment_strict(segment: &str) -> Result<AddressList, RangeError> {
    if segment.contains('/') {
        parse_cidr_block(segment)
    } else if segment.contains('-') {
        let (start, end) = dash_range_bounds(segment)?;
        AddressBlock::new(start, end)
            .map(AddressList::from)
            .ok_or(RangeError::ReversedRange { start, end })
    } else {
        parse_address(segment)
            .map(|addr| AddressList::from(AddressBlock::single(addr)))
            .map_err(|_| RangeError::Unrecognized(segment.to_string()))
    }
}

/// Rewrite every accepted separator to the canonical one, collapsing runs
/// and trimming separators at both ends.
///
/// # Examples
/// ```
/// use vdiplan::ip::range::normalize_separators;
///
/// assert_eq!(normalize_separators(" a;b，c\nd\te; "), "a,b,c,d,e");
/// ```
pub fn normalize_separators(text: &str) -> String {
    let tightened = OPERATOR_SPACING.replace_all(text.trim(), "$1");
    let normalized = SEPARATORS.replace_all(&tightened, ",");
    normalized.trim_matches(CANONICAL_SEPARATOR).to_string()
}

/// Split a raw field into its individual specifications
pub fn split_segments(text: &str) -> Vec<String> {
    normalize_separators(text)
        .split(CANONICAL_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a delimiter-separated list of specifications.
///
/// Each segment is parsed independently; a malformed segment is skipped
/// with a warning and never aborts the rest of the list.
pub fn parse_list(text: &str) -> AddressList {
    let mut addresses = AddressList::new();
    for segment in split_segments(text) {
        addresses.extend(parse_specification(&segment));
    }
    addresses
}

/// Parse a list and collect one message per bad segment instead of
/// logging it
pub fn parse_list_collecting(text: &str) -> ParsedList {
    let mut parsed = ParsedList::default();
    for segment in split_segments(text) {
        match parse_segment_strict(&segment) {
            Ok(list) => parsed.addresses.extend(list),
            Err(e) => parsed.errors.push(e.to_string()),
        }
    }
    parsed
}

/// Per-address duplicate messages reported before the rest is summarized
pub const MAX_DUPLICATE_REPORTS: u64 = 256;

/// Consecutive addresses that all occur the same number of times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateRun {
    pub block: AddressBlock,
    pub occurrences: usize,
}

/// Runs of addresses appearing more than once in the list, ascending.
///
/// Works on blocks with a sweep over block boundaries, so the result holds
/// at most two runs per block no matter how large the overlap is.
pub fn find_duplicates(list: &AddressList) -> Vec<DuplicateRun> {
    let mut events: Vec<(u64, i64)> = Vec::with_capacity(list.blocks().len() * 2);
    for block in list.blocks() {
        let (first, last) = block.bounds();
        events.push((u64::from(first), 1));
        events.push((u64::from(last) + 1, -1));
    }
    events.sort_unstable();

    let mut runs: Vec<DuplicateRun> = Vec::new();
    let mut depth: i64 = 0;
    let mut i = 0;
    while i < events.len() {
        let position = events[i].0;
        while i < events.len() && events[i].0 == position {
            depth += events[i].1;
            i += 1;
        }
        if depth < 2 || i == events.len() {
            continue;
        }

        let (first, last) = (int_to_address(position as u32), int_to_address((events[i].0 - 1) as u32));
        let occurrences = depth as usize;
        let extends_previous = runs.last().is_some_and(|run| {
            run.occurrences == occurrences && u64::from(run.block.bounds().1) + 1 == position
        });
        if extends_previous {
            if let Some(run) = runs.last_mut() {
                run.block = AddressBlock::new(run.block.first(), last).unwrap_or(run.block);
            }
        } else if let Some(block) = AddressBlock::new(first, last) {
            runs.push(DuplicateRun { block, occurrences });
        }
    }
    runs
}

/// Full validation of a raw range field: per-segment errors plus one error
/// per address that occurs more than once across the whole expansion.
///
/// Only the first [`MAX_DUPLICATE_REPORTS`] duplicates get their own
/// message; the remainder is folded into one summary line.
///
/// # Examples
/// ```
/// use vdiplan::ip::range::validate_list;
///
/// let result = validate_list("192.168.1.10-192.168.1.13;192.168.1.10-192.168.1.12");
/// assert_eq!(result.addresses.len(), 7);
/// assert_eq!(result.errors.len(), 3);
/// ```
pub fn validate_list(text: &str) -> ParsedList {
    let mut parsed = parse_list_collecting(text);
    let runs = find_duplicates(&parsed.addresses);

    let mut budget = MAX_DUPLICATE_REPORTS;
    let mut overflow_start = None;
    for run in &runs {
        let shown = run.block.len().min(budget);
        for addr in run.block.iter().take(shown as usize) {
            parsed
                .errors
                .push(format!("Duplicate IP address {} appears {} times", addr, run.occurrences));
        }
        budget -= shown;
        if shown < run.block.len() && overflow_start.is_none() {
            overflow_start = run.block.get(shown);
        }
    }

    if let (Some(start), Some(end)) = (overflow_start, runs.last().map(|run| run.block.last())) {
        let total: u64 = runs.iter().map(|run| run.block.len()).sum();
        parsed.errors.push(format!(
            "... and {} more duplicate addresses in {}-{}",
            total - MAX_DUPLICATE_REPORTS,
            start,
            end
        ));
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_address_valid() {
        assert_eq!(parse_address("0.0.0.0"), Ok(ip("0.0.0.0")));
        assert_eq!(parse_address("255.255.255.255"), Ok(ip("255.255.255.255")));
        assert_eq!(parse_address(" 10.20.30.40 "), Ok(ip("10.20.30.40")));
    }

    #[test]
    fn test_parse_address_invalid() {
        let invalid = vec![
            "", "1.2.3", "1.2.3.4.5", "01.2.3.4", "1.2.3.00", "256.1.1.1",
            "1.2.3.-4", "1..3.4", "a.b.c.d", "+1.2.3.4", "1.2.3.1000",
        ];
        for text in invalid {
            assert!(
                matches!(parse_address(text), Err(RangeError::MalformedAddress(_))),
                "'{}' should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_int_conversion_top_half_is_unsigned() {
        assert_eq!(address_to_int(ip("127.255.255.255")), 0x7FFF_FFFF);
        assert_eq!(address_to_int(ip("128.0.0.0")), 0x8000_0000);
        assert_eq!(address_to_int(ip("255.255.255.255")), u32::MAX);
        assert_eq!(int_to_address(0x8000_0001), ip("128.0.0.1"));
        assert!(address_to_int(ip("200.0.0.1")) > address_to_int(ip("100.0.0.1")));
    }

    #[test]
    fn test_dash_range_full_form() {
        let list = parse_dash_range("192.168.1.1-192.168.1.10").unwrap();
        assert_eq!(list.len(), 10);
        assert_eq!(list.first(), Some(ip("192.168.1.1")));
        assert_eq!(list.last(), Some(ip("192.168.1.10")));
    }

    #[test]
    fn test_dash_range_shorthand() {
        let list = parse_dash_range("10.1.2.250-254").unwrap();
        assert_eq!(
            list.to_strings(),
            vec!["10.1.2.250", "10.1.2.251", "10.1.2.252", "10.1.2.253", "10.1.2.254"]
        );
    }

    #[test]
    fn test_dash_range_crossing_octet_boundary() {
        let list = parse_dash_range("10.0.0.254-10.0.1.1").unwrap();
        assert_eq!(list.to_strings(), vec!["10.0.0.254", "10.0.0.255", "10.0.1.0", "10.0.1.1"]);
    }

    #[test]
    fn test_dash_range_count_property() {
        let cases = vec![
            ("10.0.0.0", "10.0.0.0"),
            ("10.0.0.1", "10.0.3.200"),
            ("127.255.255.200", "128.0.0.10"),
            ("200.1.1.1", "200.1.2.1"),
            ("255.255.255.0", "255.255.255.255"),
        ];
        for (a, b) in cases {
            let list = parse_dash_range(&format!("{}-{}", a, b)).unwrap();
            let expected = u64::from(address_to_int(ip(b))) - u64::from(address_to_int(ip(a))) + 1;
            assert_eq!(list.len(), expected, "{}-{}", a, b);
            assert_eq!(list.first(), Some(ip(a)));
            assert_eq!(list.last(), Some(ip(b)));
            let values: Vec<u32> = list.iter().map(address_to_int).collect();
            assert!(values.windows(2).all(|w| w[0] + 1 == w[1]));
        }
    }

    #[test]
    fn test_dash_range_reversed_is_empty() {
        assert!(parse_dash_range("192.168.1.20-192.168.1.10").unwrap().is_empty());
        assert!(parse_dash_range("192.168.1.20-10").unwrap().is_empty());
        assert!(parse_dash_range("200.0.0.1-100.0.0.1").unwrap().is_empty());
    }

    #[test]
    fn test_dash_range_malformed_endpoints() {
        for text in ["192.168.1-192.168.1.5", "192.168.1.1-", "192.168.1.1-300", "x-192.168.1.5", "192.168.1.1-1.2"] {
            assert!(
                matches!(parse_dash_range(text), Err(RangeError::InvalidRangeFormat(_))),
                "'{}' should be an invalid range",
                text
            );
        }
    }

    #[test]
    fn test_cidr_host_ranges() {
        let list = parse_cidr_block("192.168.10.0/29").unwrap();
        assert_eq!(
            list.to_strings(),
            vec!["192.168.10.1", "192.168.10.2", "192.168.10.3", "192.168.10.4", "192.168.10.5", "192.168.10.6"]
        );

        // Base address inside the block is normalized to the network
        let list = parse_cidr_block("192.168.10.77/30").unwrap();
        assert_eq!(list.to_strings(), vec!["192.168.10.77", "192.168.10.78"]);
    }

    #[test]
    fn test_cidr_count_property() {
        for len in 0u8..=30 {
            let list = parse_cidr_block(&format!("10.0.0.0/{}", len)).unwrap();
            assert_eq!(list.len(), (1u64 << (32 - u32::from(len))) - 2, "/{}", len);
            assert_eq!(list.len(), cidr_host_count(len));
        }
        assert!(parse_cidr_block("10.0.0.0/31").unwrap().is_empty());
        assert!(parse_cidr_block("10.0.0.0/32").unwrap().is_empty());
    }

    #[test]
    fn test_cidr_top_half() {
        let list = parse_cidr_block("172.16.0.0/12").unwrap();
        assert_eq!(list.first(), Some(ip("172.16.0.1")));
        assert_eq!(list.last(), Some(ip("172.31.255.254")));

        let list = parse_cidr_block("0.0.0.0/0").unwrap();
        assert_eq!(list.first(), Some(ip("0.0.0.1")));
        assert_eq!(list.last(), Some(ip("255.255.255.254")));
    }

    #[test]
    fn test_cidr_invalid() {
        for text in ["10.0.0.0/33", "10.0.0.0/-1", "10.0.0.0/", "10.0.0.0/abc", "10.0.0/24", "10.0.0.0/24/8"] {
            assert!(
                matches!(parse_cidr_block(text), Err(RangeError::InvalidCidr(_))),
                "'{}' should be an invalid CIDR",
                text
            );
        }
    }

    #[test]
    fn test_parse_specification_dispatch() {
        assert_eq!(parse_specification("10.0.0.1").len(), 1);
        assert_eq!(parse_specification("10.0.0.1-5").len(), 5);
        assert_eq!(parse_specification("10.0.0.0/24").len(), 254);
        assert!(parse_specification("not an ip").is_empty());
        assert!(parse_specification("10.0.0.0/40").is_empty());
        assert!(parse_specification("").is_empty());
    }

    #[test]
    fn test_mixed_separators_yield_five_segments() {
        let segments = split_segments("a;b，c\nd\te");
        assert_eq!(segments, vec!["a", "b", "c", "d", "e"]);

        let segments = split_segments(";;a ,, b；；c\r\n\nd\t\t e;");
        assert_eq!(segments, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_spaced_dash_stays_one_segment() {
        let segments = split_segments("10.0.0.1 - 10.0.0.5, 10.0.1.0 / 30");
        assert_eq!(segments, vec!["10.0.0.1-10.0.0.5", "10.0.1.0/30"]);
    }

    #[test]
    fn test_parse_list_skips_bad_segments() {
        let list = parse_list("10.0.0.1-3；garbage，10.0.0.9\n10.0.0.20-10.0.0.10");
        assert_eq!(list.to_strings(), vec!["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.9"]);
    }

    #[test]
    fn test_collecting_reports_reversed_and_unrecognized() {
        let parsed = parse_list_collecting("10.0.0.1;10.0.0.20-10.0.0.10;bogus;10.0.0.0/99");
        assert_eq!(parsed.addresses.to_strings(), vec!["10.0.0.1"]);
        assert_eq!(parsed.errors.len(), 3);
        assert!(parsed.errors[0].contains("10.0.0.20") && parsed.errors[0].contains("10.0.0.10"));
        assert!(parsed.errors[0].contains("Reversed"));
        assert!(parsed.errors[1].contains("Unrecognized") && parsed.errors[1].contains("bogus"));
        assert!(parsed.errors[2].contains("Invalid CIDR"));
    }

    #[test]
    fn test_validate_list_duplicates() {
        let result = validate_list("192.168.1.10-192.168.1.13;192.168.1.10-192.168.1.12");
        assert_eq!(result.addresses.len(), 7);
        assert_eq!(result.errors.len(), 3);
        for (err, addr) in result.errors.iter().zip(["192.168.1.10", "192.168.1.11", "192.168.1.12"]) {
            assert!(err.contains(addr), "{} should name {}", err, addr);
            assert!(err.contains("2 times"));
        }
    }

    #[test]
    fn test_validate_list_triple_overlap_counts() {
        let result = validate_list("10.0.0.1-4, 10.0.0.3/32, 10.0.0.2-3, 10.0.0.3");
        let dups: Vec<_> = find_duplicates(&result.addresses)
            .iter()
            .map(|run| (run.block.first(), run.block.len(), run.occurrences))
            .collect();
        assert_eq!(dups, vec![(ip("10.0.0.2"), 1, 2), (ip("10.0.0.3"), 1, 3)]);
        // The /32 segment is valid but contributes no addresses
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().any(|e| e.contains("10.0.0.3 appears 3 times")));
    }

    #[test]
    fn test_duplicate_runs_merge_across_touching_blocks() {
        let list = parse_list("10.0.0.1-10;10.0.0.1-4;10.0.0.5-10");
        let runs = find_duplicates(&list);
        assert_eq!(runs.len(), 1);
        assert_eq!((runs[0].block.first(), runs[0].block.last()), (ip("10.0.0.1"), ip("10.0.0.10")));
        assert_eq!(runs[0].occurrences, 2);
    }

    #[test]
    fn test_large_overlap_reports_bounded_errors() {
        let result = validate_list("10.0.0.0/8;10.0.0.0/8");
        assert_eq!(result.errors.len() as u64, MAX_DUPLICATE_REPORTS + 1);
        assert_eq!(result.errors[0], "Duplicate IP address 10.0.0.1 appears 2 times");

        let summary = result.errors.last().unwrap();
        let hosts = cidr_host_count(8);
        assert_eq!(
            summary,
            &format!(
                "... and {} more duplicate addresses in 10.0.1.1-10.255.255.254",
                hosts - MAX_DUPLICATE_REPORTS
            )
        );

        let whole = validate_list("0.0.0.0/0;0.0.0.0/0");
        assert_eq!(whole.errors.len() as u64, MAX_DUPLICATE_REPORTS + 1);
    }

    #[test]
    fn test_exactly_the_limit_has_no_summary() {
        let result = validate_list("10.0.0.0-10.0.0.255;10.0.0.0-10.0.0.255");
        assert_eq!(result.errors.len() as u64, MAX_DUPLICATE_REPORTS);
        assert!(!result.errors.iter().any(|e| e.starts_with("...")));
    }

    #[test]
    fn test_validate_list_clean_input() {
        let result = validate_list("10.0.0.1-10.0.0.5\n10.0.1.0/30");
        assert!(!result.has_errors());
        assert_eq!(result.addresses.len(), 7);
        assert!(validate_list("").addresses.is_empty());
    }
}
