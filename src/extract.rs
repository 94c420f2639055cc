//! Descriptor extractor: pick the one `ParamDoc`/`ReturnDoc` out of the extras.

use crate::descriptor::{Descriptor, Metadata};
use crate::error::{DocError, Result};

/// Find the single `D` among `extras`.
///
/// Other metadata is ignored. Two or more matches fail with
/// [`DocError::DuplicateDescriptor`], naming `position` (e.g. "parameter 'a'").
pub fn extract<D: Descriptor>(extras: &[Metadata], position: &str) -> Result<Option<D>> {
    let mut found = extras.iter().filter_map(D::from_metadata);
    let first = found.next();
    if found.next().is_some() {
        return Err(DocError::DuplicateDescriptor {
            kind: D::KIND,
            position: position.to_string(),
        });
    }
    Ok(first.cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ParamDoc, ReturnDoc};

    #[test]
    fn none_found() {
        let extras: Vec<Metadata> = vec!["not a docstring".into()];
        assert_eq!(extract::<ParamDoc>(&extras, "parameter 'a'").unwrap(), None);
        assert_eq!(extract::<ParamDoc>(&[], "parameter 'a'").unwrap(), None);
    }

    #[test]
    fn single_found_among_others() {
        let extras: Vec<Metadata> = vec![
            "tag".into(),
            ParamDoc::new("blah").into(),
            ReturnDoc::new("ignored here").into(),
        ];
        assert_eq!(
            extract::<ParamDoc>(&extras, "parameter 'a'").unwrap(),
            Some(ParamDoc::new("blah"))
        );
    }

    #[test]
    fn duplicates_rejected() {
        let extras: Vec<Metadata> = vec![ParamDoc::new("1").into(), ParamDoc::new("2").into()];
        let err = extract::<ParamDoc>(&extras, "parameter 'a'").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Only a single ParamDoc value can be provided for parameter 'a'"
        );
    }

    #[test]
    fn other_kind_does_not_count_as_duplicate() {
        let extras: Vec<Metadata> = vec![ReturnDoc::new("1").into(), ParamDoc::new("2").into()];
        assert!(extract::<ReturnDoc>(&extras, "return value").unwrap().is_some());
    }
}
