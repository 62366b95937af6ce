use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SampleError {
    #[error("nothing to choose from")]
    Empty,
    #[error("weight {weight} at index {index} is negative or not finite")]
    BadWeight { index: usize, weight: f32 },
    #[error("total weight is zero")]
    ZeroTotal,
}

/// Weighted choice over `items` for a unit draw `r` in `[0, 1)`.
///
/// Walks the normalised cumulative weights and returns the first item with a
/// positive weight whose cumulative share reaches `r`. If round-off leaves `r`
/// past the last bucket, the last positive-weight item wins.
pub fn pick_index<T, F>(items: &[T], weight: F, r: f32) -> Result<usize, SampleError>
where
    F: Fn(&T) -> f32,
{
    if items.is_empty() {
        return Err(SampleError::Empty);
    }
    let mut total = 0.0f64;
    for (index, item) in items.iter().enumerate() {
        let w = weight(item);
        if !w.is_finite() || w < 0.0 {
            return Err(SampleError::BadWeight { index, weight: w });
        }
        total += w as f64;
    }
    if total <= 0.0 {
        return Err(SampleError::ZeroTotal);
    }

    let r = r as f64;
    let mut acc = 0.0f64;
    let mut last_positive = 0;
    for (i, item) in items.iter().enumerate() {
        let w = weight(item) as f64;
        if w <= 0.0 { continue; }
        acc += w;
        last_positive = i;
        if acc / total >= r {
            return Ok(i);
        }
    }
    Ok(last_positive)
}

#[inline]
pub fn pick<'a, T, F>(items: &'a [T], weight: F, r: f32) -> Result<&'a T, SampleError>
where
    F: Fn(&T) -> f32,
{
    pick_index(items, weight, r).map(|i| &items[i])
}
