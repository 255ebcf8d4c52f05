//! VTT-to-plain-text normalization.
//!
//! Timed-text tracks repeat the same line across consecutive overlapping
//! cues, so the normalizer deduplicates globally: only the first occurrence
//! of each distinct cleaned line survives, in original order.

use std::collections::HashSet;

/// Normalize a raw WEBVTT payload into clean transcript text.
///
/// Drops blank lines, the `WEBVTT` header, `-->` timing lines, and
/// pure-numeric cue indices; strips leading `>` announcer markers and
/// surrounding whitespace from what remains; keeps only the first occurrence
/// of each distinct line. Lines are joined with `\n`, no trailing newline.
/// An input with no cues yields an empty string.
pub fn normalize_vtt(raw: &str) -> String {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.contains("WEBVTT")
            || trimmed.contains("-->")
            || trimmed.chars().all(|c| c.is_ascii_digit())
        {
            continue;
        }

        // Granicus prefixes speaker changes with ">>".
        let cleaned = trimmed.trim_start_matches('>').trim();
        if cleaned.is_empty() {
            continue;
        }

        if seen.insert(cleaned.to_string()) {
            out.push(cleaned.to_string());
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_timing_header_and_indices_and_dedupes() {
        let raw = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\n>> Hello world\n\n\
                   2\n00:00:02.000 --> 00:00:03.000\nHello world\n\n\
                   3\n00:00:03.000 --> 00:00:04.000\nGoodbye\n";
        assert_eq!(normalize_vtt(raw), "Hello world\nGoodbye");
    }

    #[test]
    fn empty_and_cueless_inputs_yield_empty_output() {
        assert_eq!(normalize_vtt(""), "");
        assert_eq!(normalize_vtt("WEBVTT\n\n"), "");
        assert_eq!(normalize_vtt("   \n\n  \n"), "");
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let raw = "WEBVTT\n\n1\n00:00:00.000 --> 00:00:01.500\n>> Call to order.\n\n\
                   2\n00:00:01.500 --> 00:00:03.000\nRoll call, please.\n\n\
                   3\n00:00:03.000 --> 00:00:04.000\nRoll call, please.\n";
        let once = normalize_vtt(raw);
        assert_eq!(normalize_vtt(&once), once);
    }

    #[test]
    fn output_keeps_first_occurrence_order_and_uniqueness() {
        let raw = "alpha\nbeta\nalpha\ngamma\nbeta\nalpha\n";
        let out = normalize_vtt(raw);
        assert_eq!(out, "alpha\nbeta\ngamma");

        let lines: Vec<&str> = out.lines().collect();
        let unique: std::collections::HashSet<&str> = lines.iter().copied().collect();
        assert_eq!(lines.len(), unique.len());
    }

    #[test]
    fn multi_line_cue_bodies_are_cleaned_per_line() {
        let raw = "WEBVTT\n\n00:00:01.000 --> 00:00:04.000\n\
                   >> First speaker line\n>>Second speaker line\n";
        assert_eq!(
            normalize_vtt(raw),
            "First speaker line\nSecond speaker line"
        );
    }

    #[test]
    fn announcer_markers_of_any_length_are_stripped() {
        assert_eq!(normalize_vtt("> one\n>> two\n>>>   three\n"), "one\ntwo\nthree");
    }

    #[test]
    fn no_trailing_newline() {
        let out = normalize_vtt("hello\n");
        assert!(!out.ends_with('\n'));
        assert_eq!(out, "hello");
    }
}
