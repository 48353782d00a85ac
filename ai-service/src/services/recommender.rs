//! Assignee recommendation.
//!
//! A placeholder: picks a team member uniformly at random. The random source
//! is injected so tests can pin the choice.

use crate::dtos::RecommendationResponse;
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const RECOMMENDATION_REASON: &str = "AI analysis suggests this member has the relevant skills.";

/// Source of uniform indices.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}

/// Thread-local RNG backed source.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Cycles through a fixed list of indices, wrapping modulo `len`.
#[derive(Debug)]
pub struct SequenceSource {
    sequence: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequenceSource {
    pub fn new(sequence: Vec<usize>) -> Self {
        Self {
            sequence,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceSource {
    fn pick_index(&self, len: usize) -> usize {
        if self.sequence.is_empty() {
            return 0;
        }
        let step = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.sequence[step % self.sequence.len()] % len
    }
}

#[derive(Clone)]
pub struct AssigneeRecommender {
    team: Arc<[String]>,
    rng: Arc<dyn RandomSource>,
}

impl AssigneeRecommender {
    /// `team` must be non-empty; configuration loading guarantees it.
    pub fn new(team: Vec<String>, rng: Arc<dyn RandomSource>) -> Self {
        Self {
            team: team.into(),
            rng,
        }
    }

    pub fn team(&self) -> &[String] {
        &self.team
    }

    pub fn recommend(&self) -> RecommendationResponse {
        let recommended_assignee = if self.team.is_empty() {
            String::new()
        } else {
            self.team[self.rng.pick_index(self.team.len())].clone()
        };

        RecommendationResponse {
            recommended_assignee,
            reason: RECOMMENDATION_REASON.to_string(),
        }
    }
}
