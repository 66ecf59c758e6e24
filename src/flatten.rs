use crate::error::NamelistError;
use crate::schema::MAX_DIMS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FlatIndex {
    /// zero-based position of the subscript in the flat storage
    pub(crate) offset: usize,
    /// total number of values the parameter can store
    pub(crate) flat_max: usize,
}

/// The subscript used when an assignment names no subscript: the first element of every dimension
pub(crate) fn default_subscript(dims: &[usize]) -> Vec<usize> {
    vec![1; dims.len()]
}

// Subscripts are 1-based. The first subscript varies fastest and the last
// one is the outermost (slowest varying) dimension:
//   1 dim:  s0
//   2 dims: s1 * d0 + s0
//   3 dims: s2 * d0 * d1 + s1 * d0 + s0
pub(crate) fn flatten(
    param: &str,
    subscript: &[usize],
    dims: &[usize],
) -> Result<FlatIndex, NamelistError> {
    if dims.len() > MAX_DIMS {
        return Err(NamelistError::UnsupportedDimensionality {
            param: param.to_string(),
            dims: dims.len(),
        });
    }
    if subscript.len() != dims.len() {
        return Err(NamelistError::DimensionMismatch {
            param: param.to_string(),
            given: subscript.len(),
            expected: dims.len(),
        });
    }
    if subscript
        .iter()
        .zip(dims)
        .any(|(&idx, &dim)| idx == 0 || idx > dim)
    {
        return Err(NamelistError::SubscriptOutOfRange {
            param: param.to_string(),
            subscript: join(subscript),
            dims: join(dims),
        });
    }

    let offset = match subscript {
        &[] => 0,
        &[s0] => s0 - 1,
        &[s0, s1] => (s1 - 1) * dims[0] + (s0 - 1),
        &[s0, s1, s2] => (s2 - 1) * dims[0] * dims[1] + (s1 - 1) * dims[0] + (s0 - 1),
        _ => unreachable!("dimension count checked above"),
    };

    Ok(FlatIndex {
        offset,
        flat_max: dims.iter().product(),
    })
}

/// Inverse of `flatten`: the 1-based subscript of a flat offset
pub(crate) fn unflatten(offset: usize, dims: &[usize]) -> Vec<usize> {
    let mut remainder = offset;
    dims.iter()
        .map(|&dim| {
            let idx = remainder % dim + 1;
            remainder /= dim;
            idx
        })
        .collect()
}

fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn dimensionless() {
        let idx = flatten("AU", &[], &[]).unwrap();
        assert_eq!(idx, FlatIndex { offset: 0, flat_max: 1 });
        assert!(default_subscript(&[]).is_empty());
    }

    #[test]
    fn offsets() {
        assert_eq!(flatten("DMA1", &[1], &[99]).unwrap().offset, 0);
        assert_eq!(flatten("DMA1", &[99], &[99]).unwrap().offset, 98);
        let idx = flatten("MA1A", &[3, 2], &[10, 99]).unwrap();
        assert_eq!(idx, FlatIndex { offset: 12, flat_max: 990 });
        let idx = flatten("TVDORA", &[2, 2, 3], &[3, 2, 99]).unwrap();
        assert_eq!(idx, FlatIndex { offset: 2 * 6 + 3 + 1, flat_max: 594 });
        assert_eq!(default_subscript(&[3, 2, 99]), vec![1, 1, 1]);
    }

    #[test]
    fn bijection() {
        for dims in [vec![7], vec![4, 5], vec![3, 2, 4], vec![2, 5, 3]] {
            let flat_max: usize = dims.iter().product();
            let mut seen = vec![false; flat_max];
            for offset in 0..flat_max {
                let subscript = unflatten(offset, &dims);
                let idx = flatten("P", &subscript, &dims).unwrap();
                assert_eq!(idx.offset, offset);
                assert_eq!(idx.flat_max, flat_max);
                assert!(!seen[offset]);
                seen[offset] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn dimension_mismatch() {
        let err = flatten("MA1A", &[1], &[10, 99]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        let err = flatten("AU", &[1], &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn too_many_dimensions() {
        let err = flatten("SRPF", &[1, 1, 1, 1], &[3, 36, 18, 2]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedDimensionality);
    }

    #[test]
    fn out_of_range() {
        let err = flatten("DMA1", &[0], &[99]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SubscriptOutOfRange);
        let err = flatten("MA1A", &[11, 1], &[10, 99]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SubscriptOutOfRange);
        assert!(err.to_string().contains("11,1"));
    }
}
