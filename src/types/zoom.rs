//! Zoom-level specification parsing.
//!
//! A zoom spec is an integer (`"12"`), a comma-separated list (`"12,14"`) or
//! a dash-range (`"12-14"`); multiple specs are unioned. Malformed tokens are
//! dropped silently; an empty result is a configuration error at the caller,
//! not here.

use itertools::Itertools;

use super::MAX_LEVEL;

/// Parses zoom-level specs into a deduplicated, ascending list of levels.
///
/// Tokens that do not parse, ranges with a start above their end, and levels
/// above 31 are all dropped.
#[must_use]
pub fn parse_zoom_levels(specs: &[String]) -> Vec<u8> {
	let mut levels: Vec<u8> = Vec::new();

	for spec in specs {
		for token in spec.split(',') {
			let token = token.trim();
			if token.is_empty() {
				continue;
			}
			if let Some((start, end)) = token.split_once('-') {
				if let (Ok(start), Ok(end)) = (start.trim().parse::<u8>(), end.trim().parse::<u8>()) {
					if start <= end && end <= MAX_LEVEL {
						levels.extend(start..=end);
					}
				}
			} else if let Ok(level) = token.parse::<u8>() {
				if level <= MAX_LEVEL {
					levels.push(level);
				}
			}
		}
	}

	levels.into_iter().sorted_unstable().dedup().collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn parse(specs: &[&str]) -> Vec<u8> {
		parse_zoom_levels(&specs.iter().map(|s| s.to_string()).collect::<Vec<String>>())
	}

	#[rstest]
	#[case(&["12-14"], &[12, 13, 14])]
	#[case(&["12", "12", "13"], &[12, 13])]
	#[case(&["3,1,2"], &[1, 2, 3])]
	#[case(&["10-12", "11,14"], &[10, 11, 12, 14])]
	#[case(&["0"], &[0])]
	#[case(&[" 5 , 7 "], &[5, 7])]
	fn parses_and_normalizes(#[case] specs: &[&str], #[case] expected: &[u8]) {
		assert_eq!(parse(specs), expected);
	}

	#[rstest]
	#[case(&["abc"])]
	#[case(&["5-3"])] // inverted range
	#[case(&["40"])] // above the supported maximum
	#[case(&["12-40"])]
	#[case(&["-3"])]
	#[case(&[""])]
	fn drops_malformed_tokens(#[case] specs: &[&str]) {
		assert!(parse(specs).is_empty());
	}

	#[test]
	fn keeps_valid_tokens_next_to_malformed_ones() {
		assert_eq!(parse(&["abc,12,x-y,13"]), vec![12, 13]);
	}
}
