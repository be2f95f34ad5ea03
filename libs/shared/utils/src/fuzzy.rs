use strsim::jaro_winkler;

/// Similarity between two short human-entered names on a 0-100 scale.
///
/// Both inputs are lowercased and split on whitespace. Every token is paired
/// with its best Jaro-Winkler counterpart on the other side, and the better
/// of the two directional averages becomes the score. Token-level pairing
/// keeps a shortened form ("Jon Smith" for "Jonathan Smith", "Aetna" for
/// "Aetna Health") close to its full counterpart.
pub fn similarity(a: &str, b: &str) -> u8 {
    let a_tokens = tokens(a);
    let b_tokens = tokens(b);
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0;
    }

    let forward = directional_average(&a_tokens, &b_tokens);
    let backward = directional_average(&b_tokens, &a_tokens);
    (forward.max(backward) * 100.0).round() as u8
}

fn tokens(input: &str) -> Vec<String> {
    input
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn directional_average(from: &[String], to: &[String]) -> f64 {
    let total: f64 = from.iter().map(|token| best_match(token, to)).sum();
    total / from.len() as f64
}

fn best_match(token: &str, candidates: &[String]) -> f64 {
    candidates
        .iter()
        .map(|candidate| jaro_winkler(token, candidate))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_score_100() {
        assert_eq!(similarity("Aetna", "Aetna"), 100);
        assert_eq!(similarity("aetna", "AETNA"), 100);
    }

    #[test]
    fn shortened_first_name_stays_above_patient_threshold() {
        assert!(similarity("Jon Smith", "Jonathan Smith") >= 85);
    }

    #[test]
    fn unrelated_names_stay_below_patient_threshold() {
        assert!(similarity("Maria Lopez", "Jonathan Smith") < 85);
    }

    #[test]
    fn provider_name_with_extra_word_stays_above_insurer_threshold() {
        assert!(similarity("Aetna Health", "Aetna") >= 80);
        assert!(similarity("Blue Cross", "Blue Cross Blue Shield") >= 80);
    }

    #[test]
    fn gibberish_scores_low_against_providers() {
        assert!(similarity("Quantum Zebra Assurance", "Aetna") < 80);
        assert!(similarity("xyzzy", "UnitedHealthcare") < 80);
    }

    #[test]
    fn empty_or_blank_input_scores_zero() {
        assert_eq!(similarity("", "Aetna"), 0);
        assert_eq!(similarity("   ", "Aetna"), 0);
    }
}
