use equilibria_common::TeamNumber;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Per-session state shared by every phase: the team number.
///
/// The team number is display data only; no validator reads it.
#[derive(Debug, Clone)]
pub struct SessionContext {
    seed: u64,
    rng: Pcg32,
    team: TeamNumber,
    generation: u32,
}

impl SessionContext {
    /// Start a session whose team numbers follow from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let team = roll(&mut rng);
        Self {
            seed,
            rng,
            team,
            generation: 1,
        }
    }

    /// Start a session seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn team(&self) -> TeamNumber {
        self.team
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// How many team numbers this session has drawn (1 + restarts).
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Draw a fresh team number for a restarted mission.
    pub fn regenerate(&mut self) -> TeamNumber {
        self.team = roll(&mut self.rng);
        self.generation += 1;
        self.team
    }
}

fn roll(rng: &mut Pcg32) -> TeamNumber {
    let value = rng.random_range(TeamNumber::MIN..=TeamNumber::MAX);
    TeamNumber::new(value).unwrap_or(TeamNumber::FIRST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_teams() {
        let mut a = SessionContext::new(42);
        let mut b = SessionContext::new(42);
        assert_eq!(a.team(), b.team());
        for _ in 0..20 {
            assert_eq!(a.regenerate(), b.regenerate());
        }
        assert_eq!(a.generation(), 21);
    }

    #[test]
    fn teams_stay_in_range() {
        let mut session = SessionContext::new(7);
        for _ in 0..1000 {
            let team = session.regenerate().get();
            assert!((TeamNumber::MIN..=TeamNumber::MAX).contains(&team));
        }
    }

    #[test]
    fn team_is_stable_until_regenerated() {
        let session = SessionContext::new(3);
        let first = session.team();
        assert_eq!(session.team(), first);
        assert_eq!(session.seed(), 3);
    }

    #[test]
    fn entropy_sessions_are_valid() {
        let session = SessionContext::from_entropy();
        assert!(TeamNumber::new(session.team().get()).is_some());
    }
}
