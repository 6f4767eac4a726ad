//! Sentence-count bound.

/// Keep the first `maximum` items in order. `maximum <= 0` keeps nothing.
pub fn truncate<T>(mut items: Vec<T>, maximum: i64) -> Vec<T> {
    let keep = usize::try_from(maximum).unwrap_or(0);
    items.truncate(keep);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_prefix_in_order() {
        assert_eq!(truncate(vec!["a", "b", "c", "d"], 2), vec!["a", "b"]);
    }

    #[test]
    fn shorter_input_is_unchanged() {
        assert_eq!(truncate(vec![1, 2], 7), vec![1, 2]);
        assert_eq!(truncate(vec![1, 2], 2), vec![1, 2]);
    }

    #[test]
    fn zero_bound_yields_empty() {
        assert!(truncate(vec![1, 2, 3], 0).is_empty());
    }

    #[test]
    fn negative_bound_yields_empty() {
        assert!(truncate(vec![1, 2, 3], -1).is_empty());
        assert!(truncate(vec![1, 2, 3], i64::MIN).is_empty());
    }

    #[test]
    fn length_is_min_of_len_and_bound() {
        let items: Vec<usize> = (0..5).collect();
        for bound in -2..8_i64 {
            let kept = truncate(items.clone(), bound);
            let expected = bound.clamp(0, 5) as usize;
            assert_eq!(kept.len(), expected, "bound {bound}");
            assert_eq!(kept[..], items[..expected]);
        }
    }
}
