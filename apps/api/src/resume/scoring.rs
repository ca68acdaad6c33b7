use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

const MAX_SCORE: u32 = 100;
const SKILL_CAP: usize = 10;
const POINTS_PER_SKILL: u32 = 2;
const EDUCATION_POINTS: u32 = 20;
const EXPERIENCE_POINTS: u32 = 20;
const EMAIL_POINTS: u32 = 10;
const PHONE_POINTS: u32 = 10;
const LINKEDIN_POINTS: u32 = 20;

/// Per-signal contributions to the résumé score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: u32,
    pub education: u32,
    pub experience: u32,
    pub email: u32,
    pub phone: u32,
    pub linkedin: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        (self.skills + self.education + self.experience + self.email + self.phone + self.linkedin)
            .min(MAX_SCORE)
    }
}

/// Additive heuristic: 2 points per skill (capped at 10 skills), flat points
/// for education, experience and each contact channel.
pub fn score_breakdown(
    skill_count: usize,
    has_education: bool,
    has_experience: bool,
    has_email: bool,
    has_phone: bool,
    has_linkedin: bool,
) -> ScoreBreakdown {
    let flag = |present: bool, points: u32| if present { points } else { 0 };

    ScoreBreakdown {
        skills: skill_count.min(SKILL_CAP) as u32 * POINTS_PER_SKILL,
        education: flag(has_education, EDUCATION_POINTS),
        experience: flag(has_experience, EXPERIENCE_POINTS),
        email: flag(has_email, EMAIL_POINTS),
        phone: flag(has_phone, PHONE_POINTS),
        linkedin: flag(has_linkedin, LINKEDIN_POINTS),
    }
}

/// Résumé score in `0..=100`.
#[allow(dead_code)]
pub fn calculate_score(
    skills: &[String],
    education: &BTreeSet<String>,
    experience: &[String],
    email: Option<&str>,
    phone: Option<&str>,
    linkedin: Option<&str>,
) -> u32 {
    score_breakdown(
        skills.len(),
        !education.is_empty(),
        !experience.is_empty(),
        email.is_some(),
        phone.is_some(),
        linkedin.is_some(),
    )
    .total()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item{i}")).collect()
    }

    fn degrees(n: usize) -> BTreeSet<String> {
        strings(n).into_iter().collect()
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        assert_eq!(calculate_score(&[], &BTreeSet::new(), &[], None, None, None), 0);
    }

    #[test]
    fn test_full_profile_is_clamped_to_100() {
        let score = calculate_score(
            &strings(12),
            &degrees(1),
            &strings(1),
            Some("a@b.io"),
            Some("9876543210"),
            Some("https://linkedin.com/in/a"),
        );
        assert_eq!(score, 100);
    }

    #[test]
    fn test_skills_capped_at_twenty_points() {
        assert_eq!(score_breakdown(10, false, false, false, false, false).skills, 20);
        assert_eq!(score_breakdown(25, false, false, false, false, false).skills, 20);
        assert_eq!(score_breakdown(3, false, false, false, false, false).skills, 6);
    }

    #[test]
    fn test_each_signal_contributes_independently() {
        let base = score_breakdown(2, false, false, false, false, false).total();
        assert_eq!(score_breakdown(2, true, false, false, false, false).total(), base + 20);
        assert_eq!(score_breakdown(2, false, true, false, false, false).total(), base + 20);
        assert_eq!(score_breakdown(2, false, false, true, false, false).total(), base + 10);
        assert_eq!(score_breakdown(2, false, false, false, true, false).total(), base + 10);
        assert_eq!(score_breakdown(2, false, false, false, false, true).total(), base + 20);
    }

    #[test]
    fn test_score_monotonic_in_skill_count() {
        let mut previous = 0;
        for n in 0..15 {
            let score = score_breakdown(n, true, false, true, false, false).total();
            assert!(score >= previous, "score dropped at {n} skills");
            assert!(score <= 100);
            previous = score;
        }
    }

    #[test]
    fn test_breakdown_total_matches_calculate_score() {
        let score = calculate_score(&strings(4), &degrees(1), &[], Some("x@y.com"), None, None);
        let breakdown = score_breakdown(4, true, false, true, false, false);
        assert_eq!(score, breakdown.total());
        assert_eq!(score, 8 + 20 + 10);
    }
}
