/// Winning class with its probability.
#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub class_index: usize,
    pub confidence: f32,
}

/// Per-class probabilities from raw model scores.
///
/// Models exported with a softmax head already emit probabilities; models
/// exported without one emit logits. The latter are detected and normalized.
pub fn probabilities(scores: &[f32]) -> Vec<f32> {
    let sum: f32 = scores.iter().sum();
    let in_range = scores.iter().all(|s| (0.0..=1.0).contains(s));

    if in_range && (sum - 1.0).abs() < 1e-3 {
        return scores.to_vec();
    }

    softmax(scores)
}

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// Argmax over class probabilities. Returns None for an empty score vector.
pub fn top_class(probs: &[f32]) -> Option<Classification> {
    probs
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(class_index, &confidence)| Classification {
            class_index,
            confidence,
        })
}
