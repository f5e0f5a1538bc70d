//! Background processors.
//!
//! - `TeamFormer`: ticks on the scheduler interval and runs a
//!   `FormationPass`, which selects due hackathons, partitions their
//!   participants into teams, commits the result and then notifies members
//!   over the `Mailer` and subscribers over the `EventBus`

pub mod formation;

pub use formation::{
    FormationError, FormationNotifier, FormationPass, FormationStore, NotifyReport,
    PgFormationStore, StoreError, TeamFormer, TickReport,
};
