//! Pronunciation accuracy as a normalized Levenshtein similarity.

/// Accuracy of `spoken` against `target`, in `[0, 100]`.
///
/// Both sides are case-folded and trimmed. Equal strings (including two empty
/// ones) score 100; if exactly one side is empty the score is 0.
pub fn accuracy(target: &str, spoken: &str) -> f64 {
    let t: Vec<char> = target.trim().to_lowercase().chars().collect();
    let s: Vec<char> = spoken.trim().to_lowercase().chars().collect();

    if t == s {
        return 100.0;
    }
    if t.is_empty() || s.is_empty() {
        return 0.0;
    }

    let distance = edit_distance(&t, &s);
    let max_len = t.len().max(s.len());

    let similarity = 1.0 - distance as f64 / max_len as f64;
    (similarity * 100.0).clamp(0.0, 100.0)
}

/// Minimum number of single-character insertions, deletions and substitutions.
/// Two-row DP; memory is `O(min(a, b))`.
pub fn edit_distance(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}
