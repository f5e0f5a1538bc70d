use rand::Rng;
use rand::seq::IndexedRandom;

pub const TEAM_NAME_PREFIX: &str = "Team-";
pub const TEAM_NAME_TOKEN_LEN: usize = 6;
const TEAM_NAME_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a short random team name such as `Team-4XQ2ZP`.
///
/// Names are not checked for uniqueness; collisions are possible and
/// tolerated.
pub fn generate_team_name<R: Rng>(rng: &mut R) -> String {
    let token: String = (0..TEAM_NAME_TOKEN_LEN)
        .filter_map(|_| TEAM_NAME_CHARSET.choose(rng).copied().map(char::from))
        .collect();
    format!("{TEAM_NAME_PREFIX}{token}")
}
