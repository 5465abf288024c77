use crate::taxonomy::{SubRule, CATEGORY_RULES};

/// Match weight per secondary-keyword hit.
const SECONDARY_HIT_WEIGHT: u32 = 2;
/// Match weight per tertiary-keyword hit (most specific, weighs most).
const TERTIARY_HIT_WEIGHT: u32 = 3;
const CONFIDENCE_DIVISOR: f64 = 10.0;

/// Outcome of the keyword rule matcher for one product name.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleMatch {
    pub primary: &'static str,
    pub secondary: Option<&'static str>,
    pub tertiary: Option<&'static str>,
    pub confidence: f64,
}

/// Match a product name against the taxonomy keyword rules.
///
/// A primary with zero keyword hits is not a candidate. Among candidates
/// the best secondary and tertiary groups are picked independently, and
/// the candidate with the highest confidence wins by strict greater-than,
/// so ties go to the earlier taxonomy table entry.
pub fn match_keywords(product_name: &str) -> Option<RuleMatch> {
    let name = product_name.to_lowercase();
    let mut best: Option<RuleMatch> = None;

    for rule in CATEGORY_RULES {
        let primary_hits =
            rule.keywords.iter().filter(|keyword| name.contains(*keyword)).count() as u32;
        if primary_hits == 0 {
            continue;
        }

        let (secondary, secondary_score) =
            best_sub_group(&name, rule.secondary, SECONDARY_HIT_WEIGHT);
        let (tertiary, tertiary_score) =
            best_sub_group(&name, rule.tertiary, TERTIARY_HIT_WEIGHT);

        let total = primary_hits + secondary_score + tertiary_score;
        let confidence = (f64::from(total) / CONFIDENCE_DIVISOR).min(1.0);

        if best.as_ref().map_or(true, |current| confidence > current.confidence) {
            best = Some(RuleMatch { primary: rule.name, secondary, tertiary, confidence });
        }
    }

    best
}

/// Best-scoring sub-group, requiring a strictly positive score.
fn best_sub_group(
    name: &str,
    groups: &'static [SubRule],
    weight: u32,
) -> (Option<&'static str>, u32) {
    let mut best_name = None;
    let mut best_score = 0;
    for group in groups {
        let hits = group.keywords.iter().filter(|keyword| name.contains(*keyword)).count() as u32;
        let score = weight * hits;
        if score > best_score {
            best_score = score;
            best_name = Some(group.name);
        }
    }
    (best_name, best_score)
}

#[cfg(test)]
mod tests {
    use super::match_keywords;

    #[test]
    fn night_cream_resolves_all_three_levels() {
        let matched = match_keywords("Hydrating Night Cream").expect("should match");
        assert_eq!(matched.primary, "Skincare");
        assert_eq!(matched.secondary, Some("Moisturizers"));
        assert_eq!(matched.tertiary, Some("Night Creams"));
        // 1 primary hit (cream) + 2 secondary hits ×2 + 1 tertiary hit ×3.
        assert_eq!(matched.confidence, 0.8);
    }

    #[test]
    fn zero_keyword_hits_means_no_assignment() {
        assert!(match_keywords("Midnight Rose").is_none());
        assert!(match_keywords("").is_none());
    }

    #[test]
    fn confidence_is_always_clamped_to_one() {
        // Stacks many Skincare keywords to push the raw score past 10.
        let matched =
            match_keywords("Exfoliating Peel Mask Serum Cream Toner Cleanser Treatment Oil")
                .expect("should match");
        assert!(matched.confidence <= 1.0);
        assert!(matched.confidence > 0.0);
    }

    #[test]
    fn confidence_ties_go_to_earlier_table_entry() {
        // "spray" hits Skincare, "tool" hits Tools & Brushes, one hit each
        // and no sub-group hits on either side.
        let matched = match_keywords("spray tool").expect("should match");
        assert_eq!(matched.primary, "Skincare");
        assert_eq!(matched.confidence, 0.1);
    }

    #[test]
    fn lipstick_prefers_makeup_over_weaker_candidates() {
        let matched = match_keywords("Velvet Matte Lipstick").expect("should match");
        assert_eq!(matched.primary, "Makeup");
        assert_eq!(matched.secondary, Some("Lips"));
        assert_eq!(matched.tertiary, Some("Lipstick"));
    }
}
