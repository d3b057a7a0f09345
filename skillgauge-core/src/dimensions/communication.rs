//! Communication dimension: clarity, empathy, professionalism, responsiveness.

use super::signals::{has_interaction, mean};
use crate::events::{InteractionEvent, InteractionKind};
use crate::scores::CommunicationScores;

pub const NEUTRAL: CommunicationScores = CommunicationScores {
    clarity: 80.0,
    empathy: 75.0,
    professionalism: 85.0,
    responsiveness: 80.0,
};

/// Empathy below this reads as dismissive.
const DISMISSIVE_EMPATHY: f64 = 30.0;
const MAX_PROACTIVE_BONUS: f64 = 10.0;

pub(crate) fn score(interactions: &[InteractionEvent]) -> CommunicationScores {
    if interactions.is_empty() {
        return NEUTRAL;
    }

    CommunicationScores {
        clarity: clarity(interactions),
        empathy: empathy(interactions),
        professionalism: professionalism(interactions),
        responsiveness: responsiveness(interactions),
    }
    .clamped()
}

fn clarity(interactions: &[InteractionEvent]) -> f64 {
    let mut score = 80.0;
    if let Some(avg) = mean(interactions.iter().map(|i| i.clarity)) {
        score += if avg >= 85.0 {
            10.0
        } else if avg >= 70.0 {
            5.0
        } else if avg < 50.0 {
            -15.0
        } else {
            -5.0
        };
    }
    let clear_explanation = interactions
        .iter()
        .any(|i| i.kind == InteractionKind::Explanation && i.clarity.is_some_and(|c| c >= 80.0));
    if clear_explanation {
        score += 5.0;
    }
    score
}

fn empathy(interactions: &[InteractionEvent]) -> f64 {
    let mut score = 75.0;
    if let Some(avg) = mean(interactions.iter().map(|i| i.empathy)) {
        if avg >= 85.0 {
            score += 15.0;
        } else if avg >= 70.0 {
            score += 5.0;
        } else if avg < 50.0 {
            score -= 10.0;
        }
    }
    if has_interaction(interactions, InteractionKind::Empathy)
        || has_interaction(interactions, InteractionKind::Apology)
    {
        score += 5.0;
    }
    score
}

fn professionalism(interactions: &[InteractionEvent]) -> f64 {
    let mut score = 85.0;
    if has_interaction(interactions, InteractionKind::Greeting) {
        score += 5.0;
    }
    if has_interaction(interactions, InteractionKind::Closing) {
        score += 5.0;
    }
    let dismissive = interactions
        .iter()
        .filter(|i| i.empathy.is_some_and(|e| e < DISMISSIVE_EMPATHY))
        .count();
    score - 5.0 * dismissive as f64
}

fn responsiveness(interactions: &[InteractionEvent]) -> f64 {
    let mut score = 80.0;
    if let Some(avg) = mean(interactions.iter().map(|i| i.response_time_secs)) {
        score += if avg <= 60.0 {
            15.0
        } else if avg <= 120.0 {
            10.0
        } else if avg <= 300.0 {
            0.0
        } else {
            -15.0
        };
    }
    let proactive = interactions.iter().filter(|i| i.proactive).count();
    score + (5.0 * proactive as f64).min(MAX_PROACTIVE_BONUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_interactions_return_neutral_default() {
        assert_eq!(score(&[]), NEUTRAL);
    }

    #[test]
    fn clarity_mid_band_is_a_small_penalty() {
        let interactions = vec![
            InteractionEvent::new(InteractionKind::Question).with_clarity(60.0),
            InteractionEvent::new(InteractionKind::Question).with_clarity(64.0),
        ];
        assert_eq!(score(&interactions).clarity, 75.0);
    }

    #[test]
    fn clear_explanation_earns_bonus() {
        let interactions = vec![
            InteractionEvent::new(InteractionKind::Explanation).with_clarity(90.0),
        ];
        // 80 + 10 + 5
        assert_eq!(score(&interactions).clarity, 95.0);
    }

    #[test]
    fn empathy_and_apology_turns_count() {
        let interactions = vec![InteractionEvent::new(InteractionKind::Apology).with_empathy(88.0)];
        // 75 + 15 + 5
        assert_eq!(score(&interactions).empathy, 95.0);
    }

    #[test]
    fn professionalism_penalizes_dismissive_turns() {
        let interactions = vec![
            InteractionEvent::new(InteractionKind::Greeting),
            InteractionEvent::new(InteractionKind::Question).with_empathy(20.0),
            InteractionEvent::new(InteractionKind::Question).with_empathy(10.0),
        ];
        // 85 + 5 - 10
        assert_eq!(score(&interactions).professionalism, 80.0);
    }

    #[test]
    fn proactive_bonus_is_capped() {
        let interactions: Vec<_> = (0..4)
            .map(|_| {
                InteractionEvent::new(InteractionKind::StatusUpdate)
                    .with_response_time(30.0)
                    .proactive()
            })
            .collect();
        // 80 + 15 + min(20, 10), clamped to 100
        assert_eq!(score(&interactions).responsiveness, 100.0);
    }

    #[test]
    fn slow_replies_hurt_responsiveness() {
        let interactions = vec![
            InteractionEvent::new(InteractionKind::Question).with_response_time(400.0),
        ];
        assert_eq!(score(&interactions).responsiveness, 65.0);
    }
}
