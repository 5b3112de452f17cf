//! Path grammar: `segment('.'segment)*('='value)?`.
//!
//! Validation works on bytes and only constrains separator placement: the
//! string must not start with `.`, must not contain `..`, may contain at most
//! one `=` which must follow an ASCII alphanumeric byte, and must end with an
//! alphanumeric byte or with that single `=`. Everything else, including the
//! characters of the value after `=`, is left to the dispatch layer.

/// Reason a path was rejected by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
	#[error("path is empty")]
	Empty,
	#[error("path starts with '.'")]
	LeadingDot,
	#[error("consecutive '.' at byte {at}")]
	ConsecutiveDots { at: usize },
	#[error("'=' at byte {at} does not follow an alphanumeric character")]
	MisplacedAssign { at: usize },
	#[error("second '=' at byte {at}")]
	MultipleAssign { at: usize },
	#[error("path must end with an alphanumeric character or '='")]
	BadTerminator,
}

/// Checks `path` against the grammar, reporting the first violated rule.
pub fn check_path(path: &str) -> Result<(), PathError> {
	let bytes = path.as_bytes();
	let Some(&last) = bytes.last() else {
		return Err(PathError::Empty);
	};
	if bytes[0] == b'.' {
		return Err(PathError::LeadingDot);
	}

	let mut has_assign = false;
	let mut prev: Option<u8> = None;
	for (at, &b) in bytes.iter().enumerate() {
		match b {
			b'.' if prev == Some(b'.') => return Err(PathError::ConsecutiveDots { at }),
			b'=' if has_assign => return Err(PathError::MultipleAssign { at }),
			b'=' => {
				if !prev.is_some_and(|p| p.is_ascii_alphanumeric()) {
					return Err(PathError::MisplacedAssign { at });
				}
				has_assign = true;
			}
			_ => {}
		}
		prev = Some(b);
	}

	if last.is_ascii_alphanumeric() || (last == b'=' && has_assign) {
		Ok(())
	} else {
		Err(PathError::BadTerminator)
	}
}

/// Returns whether `path` is syntactically legal.
pub fn validate_path(path: &str) -> bool {
	check_path(path).is_ok()
}

/// Splits on the first `=` into the lookup key and the optional payload.
///
/// Performs no validation.
pub fn split_path(path: &str) -> (&str, Option<&str>) {
	match path.split_once('=') {
		Some((key, value)) => (key, Some(value)),
		None => (path, None),
	}
}

/// A validated path split into key and optional inline value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSpec<'a> {
	pub key: &'a str,
	pub value: Option<&'a str>,
}

impl<'a> PathSpec<'a> {
	/// Validates `path` and splits it.
	pub fn parse(path: &'a str) -> Result<Self, PathError> {
		check_path(path)?;
		let (key, value) = split_path(path);
		Ok(Self { key, value })
	}

	/// Iterates the dot-delimited segments of the key.
	pub fn segments(&self) -> impl Iterator<Item = &'a str> + 'a {
		self.key.split('.')
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("x")]
	#[case("x=1")]
	#[case("x.y")]
	#[case("x.y=1")]
	#[case("x.y=string")]
	#[case("x.y=string with spaces")]
	#[case("debug.heap.alloc_pattern")]
	#[case("debug.heap.alloc_pattern=1")]
	#[case("x.y=")]
	fn accepts(#[case] path: &str) {
		assert!(validate_path(path), "{path:?} should be accepted");
	}

	#[rstest]
	#[case("x..y", PathError::ConsecutiveDots { at: 2 })]
	#[case("x..y=1", PathError::ConsecutiveDots { at: 2 })]
	#[case("x.y.=1", PathError::MisplacedAssign { at: 4 })]
	#[case(".x.y=1", PathError::LeadingDot)]
	#[case("", PathError::Empty)]
	#[case("=1", PathError::MisplacedAssign { at: 0 })]
	#[case("x=1=2", PathError::MultipleAssign { at: 3 })]
	#[case("x==", PathError::MultipleAssign { at: 2 })]
	#[case("x.", PathError::BadTerminator)]
	#[case("x.y=a.", PathError::BadTerminator)]
	#[case("x=a..b", PathError::ConsecutiveDots { at: 4 })]
	fn rejects(#[case] path: &str, #[case] expected: PathError) {
		assert_eq!(check_path(path), Err(expected));
	}

	#[test]
	fn split_on_first_assign() {
		assert_eq!(split_path("a.b=c d"), ("a.b", Some("c d")));
		assert_eq!(split_path("a.b="), ("a.b", Some("")));
		assert_eq!(split_path("a.b"), ("a.b", None));
	}

	#[test]
	fn parsed_segments() {
		let spec = PathSpec::parse("debug.heap.alloc_pattern=1").unwrap();
		assert_eq!(spec.key, "debug.heap.alloc_pattern");
		assert_eq!(spec.value, Some("1"));
		assert_eq!(
			spec.segments().collect::<Vec<_>>(),
			["debug", "heap", "alloc_pattern"]
		);
	}

	proptest! {
		#[test]
		fn accepted_keys_have_no_empty_segment(path in "[a-z0-9._= ]{0,16}") {
			if let Ok(spec) = PathSpec::parse(&path) {
				prop_assert!(!spec.key.starts_with('.'));
				prop_assert!(spec.segments().all(|s| !s.is_empty()));
			}
		}

		#[test]
		fn rejected_paths_break_a_rule(path in "[a-z.=]{0,12}") {
			if !validate_path(&path) {
				let bytes = path.as_bytes();
				let assigns = bytes.iter().filter(|&&b| b == b'=').count();
				let broken = bytes.is_empty()
					|| bytes[0] == b'.'
					|| path.contains("..")
					|| assigns > 1
					|| path.contains(".=")
					|| bytes[0] == b'='
					|| !(bytes[bytes.len() - 1].is_ascii_alphanumeric()
						|| bytes[bytes.len() - 1] == b'=');
				prop_assert!(broken, "{path:?} rejected without a broken rule");
			}
		}
	}
}
