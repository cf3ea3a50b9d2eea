//! The format compatibility table: which conversions are offered.
//!
//! Legality is enumerated as static data, never inferred from which routines
//! happen to exist. The two can diverge: a pair listed here without a
//! matching dispatch arm must surface as
//! [`ConvertError::UnsupportedConversion`](crate::error::ConvertError::UnsupportedConversion)
//! at dispatch time rather than silently do nothing.

use crate::format::Extension;
use Extension::*;

/// Source extension to its ordered list of permitted targets.
///
/// The relation is not symmetric: `xlsx` may become `csv` and vice versa,
/// but `jpeg` is accepted only as a source.
const COMPATIBILITY: &[(Extension, &[Extension])] = &[
    (Pdf, &[Txt, Png, Jpg, Docx]),
    (Csv, &[Pdf, Xlsx, Txt]),
    (Xlsx, &[Pdf, Csv, Txt]),
    (Txt, &[Pdf, Docx]),
    (Png, &[Jpg, Pdf]),
    (Jpg, &[Png, Pdf]),
    (Jpeg, &[Png, Pdf]),
    (Docx, &[Pdf, Txt]),
];

/// The ordered targets offered for `source`.
///
/// Returns an empty slice for a source with no table entry; never fails.
pub fn permitted_targets(source: Extension) -> &'static [Extension] {
    COMPATIBILITY
        .iter()
        .find(|(s, _)| *s == source)
        .map(|(_, targets)| *targets)
        .unwrap_or(&[])
}

/// Whether the `source` to `target` conversion is offered.
pub fn is_permitted(source: Extension, target: Extension) -> bool {
    permitted_targets(source).contains(&target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_source_has_an_entry() {
        for source in Extension::ALL {
            assert!(
                !permitted_targets(source).is_empty(),
                "{source} has no targets"
            );
        }
    }

    #[test]
    fn target_order_is_preserved() {
        assert_eq!(permitted_targets(Pdf), &[Txt, Png, Jpg, Docx]);
        assert_eq!(permitted_targets(Csv), &[Pdf, Xlsx, Txt]);
    }

    #[test]
    fn relation_is_not_symmetric() {
        assert!(is_permitted(Pdf, Docx));
        assert!(is_permitted(Docx, Pdf));
        assert!(is_permitted(Jpeg, Png));
        assert!(!is_permitted(Png, Jpeg), "jpeg is never a target");
        assert!(!is_permitted(Pdf, Csv));
        assert!(!is_permitted(Txt, Csv));
    }

    #[test]
    fn identity_pairs_are_not_offered() {
        for source in Extension::ALL {
            assert!(
                !is_permitted(source, source),
                "{source} -> {source} should not be offered"
            );
        }
    }

    #[test]
    fn jpeg_never_appears_as_a_target() {
        for source in Extension::ALL {
            assert!(!permitted_targets(source).contains(&Jpeg));
        }
    }
}
