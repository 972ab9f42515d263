use serde::Serialize;

// Score thresholds past which steps 2–4 read as completed. Tunable without
// touching the scoring algorithm; the derivation below is pure.
const CABINET_THRESHOLD: u8 = 30;
const CGV_THRESHOLD: u8 = 70;
const CLIENTS_THRESHOLD: u8 = 85;

/// One onboarding step shown on the dashboard completion card.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionStep {
    pub title: &'static str,
    pub description: &'static str,
    pub completed: bool,
    pub weight: u32,
    pub link: Option<&'static str>,
}

/// Derives the four fixed onboarding steps from the latest known score.
///
/// Account creation is completed by construction; the rest are threshold
/// comparisons on the score, with no knowledge of how it was computed.
pub fn completion_steps(score: u8) -> Vec<CompletionStep> {
    vec![
        CompletionStep {
            title: "Account creation",
            description: "Your account is registered and ready to use.",
            completed: true,
            weight: 25,
            link: None,
        },
        CompletionStep {
            title: "Cabinet information",
            description: "Fill in your firm's identity and contact details.",
            completed: score > CABINET_THRESHOLD,
            weight: 40,
            link: Some("/settings/cabinet"),
        },
        CompletionStep {
            title: "CGV information",
            description: "Configure the terms-of-service clauses used in your mission letters.",
            completed: score > CGV_THRESHOLD,
            weight: 20,
            link: Some("/settings/cgv"),
        },
        CompletionStep {
            title: "Client onboarding",
            description: "Add your first clients to start generating mission letters.",
            completed: score > CLIENTS_THRESHOLD,
            weight: 15,
            link: Some("/clients"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_flags(score: u8) -> Vec<bool> {
        completion_steps(score).iter().map(|s| s.completed).collect()
    }

    #[test]
    fn test_account_step_always_completed() {
        assert!(completion_steps(0)[0].completed);
        assert!(completion_steps(100)[0].completed);
    }

    #[test]
    fn test_default_score_completes_only_account() {
        assert_eq!(completed_flags(25), vec![true, false, false, false]);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // boundary values do not complete their step
        assert_eq!(completed_flags(30), vec![true, false, false, false]);
        assert_eq!(completed_flags(31), vec![true, true, false, false]);
        assert_eq!(completed_flags(70), vec![true, true, false, false]);
        assert_eq!(completed_flags(71), vec![true, true, true, false]);
        assert_eq!(completed_flags(85), vec![true, true, true, false]);
        assert_eq!(completed_flags(86), vec![true, true, true, true]);
    }

    #[test]
    fn test_step_weights_sum_to_100() {
        let total: u32 = completion_steps(0).iter().map(|s| s.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_incomplete_steps_carry_a_link() {
        let steps = completion_steps(0);
        assert!(steps[0].link.is_none());
        assert!(steps[1..].iter().all(|s| s.link.is_some()));
    }
}
