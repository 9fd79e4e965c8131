// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Badge payload codec: a fixed, reversible character-substitution cipher.
//!
//! Printed badges carry the scrambled form; [`decode`] maps scanned text
//! back to the plain identifier and [`encode`] is the inverse, used by the
//! badge generator. This is deliberate obfuscation, not a security boundary.

use crate::types::StudentId;

/// Substitution pairs as `(scanned, plain)`. The table is a bijection over
/// `[A-Za-z0-9_]`; characters outside it decode to nothing and are dropped.
const PAIRS: &[(char, char)] = &[
    ('_', '_'),
    ('G', 'A'), ('Z', 'B'), ('R', 'C'), ('L', 'D'), ('V', 'E'), ('N', 'F'),
    ('H', 'G'), ('Q', 'H'), ('J', 'I'), ('P', 'J'), ('W', 'K'), ('S', 'L'),
    ('B', 'M'), ('T', 'N'), ('U', 'O'), ('M', 'P'), ('K', 'Q'), ('F', 'R'),
    ('X', 'S'), ('A', 'T'), ('O', 'U'), ('E', 'V'), ('Y', 'W'), ('D', 'X'),
    ('C', 'Y'), ('I', 'Z'),
    ('h', 'a'), ('q', 'b'), ('e', 'c'), ('k', 'd'), ('r', 'e'), ('v', 'f'),
    ('y', 'g'), ('b', 'h'), ('j', 'i'), ('z', 'j'), ('m', 'k'), ('o', 'l'),
    ('u', 'm'), ('s', 'n'), ('g', 'o'), ('x', 'p'), ('l', 'q'), ('p', 'r'),
    ('f', 's'), ('d', 't'), ('n', 'u'), ('t', 'v'), ('a', 'w'), ('c', 'x'),
    ('w', 'y'), ('i', 'z'),
    ('5', '0'), ('8', '1'), ('3', '2'), ('7', '3'), ('1', '4'), ('9', '5'),
    ('0', '6'), ('4', '7'), ('2', '8'), ('6', '9'),
];

fn decode_char(c: char) -> Option<char> {
    PAIRS.iter().find(|(s, _)| *s == c).map(|(_, p)| *p)
}

fn encode_char(c: char) -> Option<char> {
    PAIRS.iter().find(|(_, p)| *p == c).map(|(s, _)| *s)
}

/// Decode scanned badge text to its plain form, dropping unmapped characters.
pub fn decode(raw: &str) -> String {
    raw.chars().filter_map(decode_char).collect()
}

/// Encode a plain payload into its scanned (badge) form, dropping unmapped
/// characters. Inverse of [`decode`] on the mapped domain.
pub fn encode(plain: &str) -> String {
    plain.chars().filter_map(encode_char).collect()
}

/// Decode scanned text and validate the sentinel prefix.
///
/// Returns the [`StudentId`] (decoded payload with the prefix stripped), or
/// `None` when the decoded text does not start with `prefix`. Callers must
/// treat `None` as an invalid badge and abort the frame without touching any
/// session state.
pub fn student_id(raw: &str, prefix: &str) -> Option<StudentId> {
    let decoded = decode(raw);
    decoded
        .strip_prefix(prefix)
        .map(|rest| StudentId(rest.to_string()))
}

/// Encode a plain student identifier into the badge payload, sentinel
/// prefix included. Inverse of [`student_id`].
pub fn badge_payload(id: &StudentId, prefix: &str) -> String {
    encode(&format!("{prefix}{}", id.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_a_bijection() {
        let mut scanned: Vec<char> = PAIRS.iter().map(|(s, _)| *s).collect();
        let mut plain: Vec<char> = PAIRS.iter().map(|(_, p)| *p).collect();
        scanned.sort_unstable();
        plain.sort_unstable();
        scanned.dedup();
        plain.dedup();
        assert_eq!(scanned.len(), PAIRS.len(), "duplicate scanned chars");
        assert_eq!(plain.len(), PAIRS.len(), "duplicate plain chars");
    }

    #[test]
    fn decode_inverts_encode_on_mapped_domain() {
        let plain = "mvba_Student_042_XYZ";
        assert_eq!(decode(&encode(plain)), plain);
    }

    #[test]
    fn unmapped_characters_are_dropped() {
        assert_eq!(decode("G!Z @R"), "ABC");
        assert_eq!(encode("A-B C"), "GZR");
    }

    #[test]
    fn sentinel_prefix_required() {
        // "utqh_" decodes to "mvba_".
        assert_eq!(decode("utqh_"), "mvba_");
        assert!(student_id("utqh_X8", "mvba_").is_some());
        assert!(student_id("X8", "mvba_").is_none());
        assert!(student_id("", "mvba_").is_none());
    }

    #[test]
    fn student_id_strips_prefix() {
        let raw = encode("mvba_S123");
        let id = student_id(&raw, "mvba_").expect("valid badge");
        assert_eq!(id.as_str(), "S123");
    }

    #[test]
    fn badge_payload_round_trips() {
        let id = StudentId("S123".to_string());
        let raw = badge_payload(&id, "mvba_");
        assert_eq!(student_id(&raw, "mvba_"), Some(id));
    }
}
