//! Random partitioning of participants into teams.
//!
//! Pure given a random source: no I/O, and the same seed always yields the
//! same plan.

use crate::entities::MemberRole;
use crate::entities::hackathon::EligibleHackathon;
use crate::entities::participant::Participant;
use crate::utils::team_name::generate_team_name;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::num::NonZeroUsize;
use thiserror::Error;

/// Reasons a hackathon cannot be partitioned this tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("hackathon has no participants")]
    NoParticipants,

    #[error("hackathon has no problem statements")]
    NoProblemStatements,

    #[error("invalid max team size {0}")]
    InvalidTeamSize(i32),
}

/// A team that has been planned but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTeam {
    pub name: String,
    pub problem_statement: String,
    /// Members in partition order; index 0 is the leader.
    pub members: Vec<PlannedMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMember {
    pub participant: Participant,
    pub role: MemberRole,
}

/// Output of the partitioner for one hackathon.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartitionPlan {
    pub teams: Vec<PlannedTeam>,
}

impl PartitionPlan {
    pub fn member_count(&self) -> usize {
        self.teams.iter().map(|t| t.members.len()).sum()
    }
}

/// Validate a hackathon before partitioning and return its team size.
pub fn check_preconditions(
    hackathon: &EligibleHackathon,
) -> Result<NonZeroUsize, PreconditionError> {
    if hackathon.participants.is_empty() {
        return Err(PreconditionError::NoParticipants);
    }
    if hackathon.problem_statements.is_empty() {
        return Err(PreconditionError::NoProblemStatements);
    }
    usize::try_from(hackathon.max_team_size)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(PreconditionError::InvalidTeamSize(hackathon.max_team_size))
}

/// Split `participants` into teams of `team_size`.
///
/// The participants are shuffled once with an unbiased Fisher–Yates shuffle
/// and then chunked greedily, so every team has exactly `team_size` members
/// except possibly the last one. Each team draws its problem statement
/// uniformly with replacement and gets a random name. The first member of
/// each team is its leader.
pub fn partition<R: Rng>(
    participants: &[Participant],
    team_size: NonZeroUsize,
    problem_statements: &[String],
    rng: &mut R,
) -> Result<PartitionPlan, PreconditionError> {
    let mut order = participants.to_vec();
    order.shuffle(rng);

    let mut teams = Vec::with_capacity(order.len().div_ceil(team_size.get()));
    for group in order.chunks(team_size.get()) {
        let problem_statement = problem_statements
            .choose(rng)
            .ok_or(PreconditionError::NoProblemStatements)?
            .clone();
        let members = group
            .iter()
            .enumerate()
            .map(|(index, participant)| PlannedMember {
                participant: participant.clone(),
                role: if index == 0 {
                    MemberRole::Leader
                } else {
                    MemberRole::Developer
                },
            })
            .collect();

        teams.push(PlannedTeam {
            name: generate_team_name(rng),
            problem_statement,
            members,
        });
    }

    Ok(PartitionPlan { teams })
}
